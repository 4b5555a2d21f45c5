use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::dto::CreateTeamRequest;
use crate::entities::{owner, player, season, team};
use crate::error::FieldError;
use crate::services::{SeasonService, ServiceError, ServiceResult};

/// A team's purchases in one season.
#[derive(Debug, Clone)]
pub struct Roster {
    pub team: team::Model,
    pub season: season::Model,
    pub players: Vec<player::Model>,
    pub total_spent: i64,
}

pub struct TeamService;

impl TeamService {
    /// Active teams with their owner, oldest first.
    pub async fn list_active(
        db: &DatabaseConnection,
    ) -> ServiceResult<Vec<(team::Model, Option<owner::Model>)>> {
        Ok(team::Entity::find()
            .filter(team::Column::IsActive.eq(true))
            .order_by_asc(team::Column::CreatedAt)
            .find_also_related(owner::Entity)
            .all(db)
            .await?)
    }

    pub async fn create(
        db: &DatabaseConnection,
        req: CreateTeamRequest,
    ) -> ServiceResult<(team::Model, owner::Model)> {
        let mut errors = Vec::new();
        let team_name = req.team_name.trim().to_string();
        if team_name.chars().count() < 2 {
            errors.push(FieldError::new("teamName", "Team name must be at least 2 characters"));
        }
        let owner_id = req.owner_id.trim().parse::<Uuid>().ok();
        if owner_id.is_none() {
            errors.push(FieldError::new("ownerId", "Owner id must be a valid UUID"));
        }
        let Some(owner_id) = owner_id.filter(|_| errors.is_empty()) else {
            return Err(ServiceError::Validation(errors));
        };

        let owner = owner::Entity::find_by_id(owner_id)
            .one(db)
            .await?
            .ok_or(ServiceError::OwnerNotFound)?;

        let duplicate = team::Entity::find()
            .filter(team::Column::OwnerId.eq(owner.id))
            .filter(team::Column::TeamName.eq(&team_name))
            .one(db)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(
                "Team with this name already exists for this owner".to_string(),
            ));
        }

        let created = team::ActiveModel {
            id: Set(Uuid::new_v4()),
            team_name: Set(team_name),
            owner_id: Set(owner.id),
            team_image: Set(crate::services::accounts::non_empty(req.team_image)),
            is_active: Set(true),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(db)
        .await?;

        tracing::info!(team_id = %created.id, owner_id = %owner.id, "team created");
        Ok((created, owner))
    }

    /// Players bought by `team_id` in the given season (default: current).
    pub async fn roster(
        db: &DatabaseConnection,
        team_id: Uuid,
        season_id: Option<Uuid>,
    ) -> ServiceResult<Roster> {
        let team = team::Entity::find_by_id(team_id)
            .one(db)
            .await?
            .ok_or(ServiceError::TeamNotFound)?;
        let season = SeasonService::resolve(db, season_id).await?;

        let players = player::Entity::find()
            .filter(player::Column::TeamId.eq(team.id))
            .filter(player::Column::SeasonId.eq(season.id))
            .filter(player::Column::IsActive.eq(true))
            .order_by_asc(player::Column::Name)
            .all(db)
            .await?;

        let total_spent = total_spent(players.iter().map(|p| p.price));

        Ok(Roster {
            team,
            season,
            players,
            total_spent,
        })
    }
}

/// Sum of sale prices, pinned at `i64::MAX` rather than overflowing.
fn total_spent(prices: impl IntoIterator<Item = Option<i64>>) -> i64 {
    prices.into_iter().flatten().fold(0, i64::saturating_add)
}
