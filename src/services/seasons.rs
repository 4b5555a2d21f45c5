use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::dto::CreateSeasonRequest;
use crate::entities::season;
use crate::error::FieldError;
use crate::services::{ServiceError, ServiceResult};

pub struct SeasonService;

impl SeasonService {
    /// The most recently created active season, if any.
    pub async fn current(db: &DatabaseConnection) -> ServiceResult<Option<season::Model>> {
        Ok(season::Entity::find()
            .filter(season::Column::IsActive.eq(true))
            .order_by_desc(season::Column::CreatedAt)
            .one(db)
            .await?)
    }

    /// Like [`Self::current`], but a missing season is an error.
    pub async fn require_current(db: &DatabaseConnection) -> ServiceResult<season::Model> {
        Self::current(db).await?.ok_or(ServiceError::NoActiveSeason)
    }

    pub async fn find(db: &DatabaseConnection, id: Uuid) -> ServiceResult<season::Model> {
        season::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::SeasonNotFound)
    }

    /// The given season, or the current one when none is named.
    pub async fn resolve(
        db: &DatabaseConnection,
        id: Option<Uuid>,
    ) -> ServiceResult<season::Model> {
        match id {
            Some(id) => Self::find(db, id).await,
            None => Self::require_current(db).await,
        }
    }

    /// Create a season. With `activate` (the default) every other season is
    /// deactivated in the same transaction.
    pub async fn create(
        db: &DatabaseConnection,
        req: CreateSeasonRequest,
    ) -> ServiceResult<season::Model> {
        let schedule = Schedule::parse(&req)?;
        let year = req.year.trim().to_string();
        let season_number = i32::try_from(req.season_number)
            .map_err(|_| ServiceError::Validation(vec![season_number_error()]))?;

        let existing = season::Entity::find()
            .filter(season::Column::Year.eq(&year))
            .filter(season::Column::SeasonNumber.eq(season_number))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Season already exists for this year and season number".to_string(),
            ));
        }

        let activate = req.activate.unwrap_or(true);
        let txn = db.begin().await?;

        if activate {
            season::Entity::update_many()
                .col_expr(season::Column::IsActive, Expr::value(false))
                .filter(season::Column::IsActive.eq(true))
                .exec(&txn)
                .await?;
        }

        let created = season::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_name: Set(req
                .season_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())),
            year: Set(year),
            season_number: Set(season_number),
            start_date: Set(schedule.start),
            end_date: Set(schedule.end),
            auction_date: Set(schedule.auction),
            is_active: Set(activate),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(
            season_id = %created.id,
            year = %created.year,
            season_number = created.season_number,
            active = created.is_active,
            "season created"
        );
        Ok(created)
    }
}

/// The three season dates, validated and pinned to midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schedule {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    auction: DateTime<FixedOffset>,
}

impl Schedule {
    fn parse(req: &CreateSeasonRequest) -> ServiceResult<Self> {
        let mut errors = Vec::new();

        if req.year.trim().chars().count() < 4 {
            errors.push(FieldError::new("year", "Year must be at least 4 characters"));
        }
        if req.season_number <= 0 {
            errors.push(season_number_error());
        }
        let start = parse_date(&req.start_date, "startDate", &mut errors);
        let end = parse_date(&req.end_date, "endDate", &mut errors);
        let auction = parse_date(&req.auction_date, "auctionDate", &mut errors);

        let (Some(start), Some(end), Some(auction)) = (start, end, auction) else {
            return Err(ServiceError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        if end <= start {
            return Err(ServiceError::InvalidSchedule(
                "End date must be after start date".to_string(),
            ));
        }
        if auction < start || auction > end {
            return Err(ServiceError::InvalidSchedule(
                "Auction date must be between start and end date".to_string(),
            ));
        }

        Ok(Self {
            start,
            end,
            auction,
        })
    }
}

fn season_number_error() -> FieldError {
    FieldError::new("seasonNumber", "Season number must be a positive integer")
}

fn parse_date(
    value: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    let well_formed = value.len() == 10 && value.as_bytes()[4] == b'-' && value.as_bytes()[7] == b'-';

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) if well_formed => Some(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()),
        _ => {
            errors.push(FieldError::new(field, "Date must be in YYYY-MM-DD format"));
            None
        }
    }
}
