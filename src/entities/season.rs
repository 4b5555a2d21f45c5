use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "season")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub season_name: Option<String>,
    pub year: String,
    pub season_number: i32,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub auction_date: DateTimeWithTimeZone,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player::Entity")]
    Players,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The auction is over strictly after `auction_date`.
    #[must_use]
    pub fn is_auction_over(&self, now: chrono::DateTime<Utc>) -> bool {
        now > self.auction_date.with_timezone(&Utc)
    }

    /// Public registration stays open until the auction closes.
    #[must_use]
    pub fn is_registration_open(&self, now: chrono::DateTime<Utc>) -> bool {
        self.is_active && !self.is_auction_over(now)
    }
}
