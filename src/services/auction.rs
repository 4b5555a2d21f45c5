use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::dto::{AssignRequest, PhotoUpload, UnassignRequest, UpdateSaleRequest};
use crate::entities::{PlayerRole, player, team};
use crate::services::registration::{normalize_phone, photo_payload};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{ImageStore, PLAYER_PHOTO_FOLDER};

/// Sale and edit operations used from the auction desk.
pub struct AuctionService;

impl AuctionService {
    /// First sale of an unsold player.
    ///
    /// The write only applies while `team_id` is still `NULL`, so of two
    /// concurrent sales of the same player exactly one wins.
    pub async fn assign(
        db: &DatabaseConnection,
        req: AssignRequest,
    ) -> ServiceResult<player::Model> {
        let price = req
            .price
            .filter(|p| *p > 0)
            .ok_or(ServiceError::InvalidPrice)?;
        let player_id = req.player_id.ok_or(ServiceError::PlayerIdRequired)?;
        let team_id = req.team_id.ok_or(ServiceError::InvalidInput)?;

        let player = find_player(db, player_id).await?;
        let team = find_team(db, team_id).await?;
        if player.is_sold() {
            return Err(ServiceError::AlreadySold);
        }

        let result = player::Entity::update_many()
            .col_expr(player::Column::TeamId, Expr::value(team.id))
            .col_expr(player::Column::Price, Expr::value(price))
            .col_expr(player::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(player::Column::Id.eq(player.id))
            .filter(player::Column::TeamId.is_null())
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            tracing::warn!(player_id = %player.id, "lost a concurrent sale");
            return Err(ServiceError::AlreadySold);
        }

        tracing::info!(player_id = %player.id, team_id = %team.id, price, "player sold");
        find_player(db, player.id).await
    }

    /// Correct the team or price of a sold player. Last write wins.
    pub async fn update_sale(
        db: &DatabaseConnection,
        req: UpdateSaleRequest,
    ) -> ServiceResult<player::Model> {
        let (Some(player_id), Some(team_id), Some(price)) = (req.player_id, req.team_id, req.price)
        else {
            return Err(ServiceError::InvalidInput);
        };
        if price <= 0 {
            return Err(ServiceError::InvalidInput);
        }

        let player = find_player(db, player_id).await?;
        let team = find_team(db, team_id).await?;
        if !player.is_sold() {
            return Err(ServiceError::NotSold);
        }

        let previous_team = player.team_id;
        let mut active: player::ActiveModel = player.into();
        active.team_id = Set(Some(team.id));
        active.price = Set(Some(price));
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(db).await?;

        tracing::info!(
            player_id = %updated.id,
            from_team = ?previous_team,
            team_id = %team.id,
            price,
            "sale corrected"
        );
        Ok(updated)
    }

    /// Return a player to the unsold pool. The price is cleared unless
    /// `resetPrice` is `false`.
    pub async fn unassign(
        db: &DatabaseConnection,
        req: UnassignRequest,
    ) -> ServiceResult<player::Model> {
        let player_id = req.player_id.ok_or(ServiceError::PlayerIdRequired)?;
        let player = player::Entity::find_by_id(player_id)
            .one(db)
            .await?
            .ok_or(ServiceError::PlayerNotFound)?;

        let reset_price = req.reset_price.unwrap_or(true);
        let mut active: player::ActiveModel = player.into();
        active.team_id = Set(None);
        if reset_price {
            active.price = Set(None);
        }
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(db).await?;

        tracing::info!(player_id = %updated.id, reset_price, "player unassigned");
        Ok(updated)
    }

    /// Change a player's phone. It must stay unique among the season's active
    /// players.
    pub async fn update_phone(
        db: &DatabaseConnection,
        player_id: Uuid,
        phone: &str,
    ) -> ServiceResult<player::Model> {
        let phone = normalize_phone(phone)?;
        let player = find_player(db, player_id).await?;

        let taken = player::Entity::find()
            .filter(player::Column::Phone.eq(&phone))
            .filter(player::Column::SeasonId.eq(player.season_id))
            .filter(player::Column::IsActive.eq(true))
            .filter(player::Column::Id.ne(player.id))
            .one(db)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::PhoneInUse);
        }

        let mut active: player::ActiveModel = player.into();
        active.phone = Set(phone);
        active.updated_at = Set(Utc::now().fixed_offset());
        Ok(active.update(db).await?)
    }

    pub async fn update_role(
        db: &DatabaseConnection,
        player_id: Uuid,
        role: &str,
    ) -> ServiceResult<player::Model> {
        let role = PlayerRole::from_str(role).ok_or(ServiceError::InvalidRole)?;
        let player = find_player(db, player_id).await?;

        let mut active: player::ActiveModel = player.into();
        active.role = Set(role.as_str().to_string());
        active.updated_at = Set(Utc::now().fixed_offset());
        Ok(active.update(db).await?)
    }

    /// Upload a replacement photo and point the player at it.
    pub async fn update_photo(
        db: &DatabaseConnection,
        images: &dyn ImageStore,
        player_id: Uuid,
        photo: &PhotoUpload,
    ) -> ServiceResult<player::Model> {
        if photo.bytes.is_empty() {
            return Err(ServiceError::MissingFields);
        }
        let payload = photo_payload(photo)?;
        let player = find_player(db, player_id).await?;

        let url = images
            .upload(&payload, PLAYER_PHOTO_FOLDER)
            .await
            .map_err(ServiceError::Storage)?;

        let mut active: player::ActiveModel = player.into();
        active.photo_url = Set(Some(url));
        active.updated_at = Set(Utc::now().fixed_offset());
        Ok(active.update(db).await?)
    }
}

async fn find_player(db: &DatabaseConnection, id: Uuid) -> ServiceResult<player::Model> {
    player::Entity::find_by_id(id)
        .filter(player::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(ServiceError::PlayerNotFound)
}

async fn find_team(db: &DatabaseConnection, id: Uuid) -> ServiceResult<team::Model> {
    team::Entity::find_by_id(id)
        .filter(team::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(ServiceError::TeamNotFound)
}
