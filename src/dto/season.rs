use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::season;

/// Dates are `YYYY-MM-DD` and interpreted as midnight UTC.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonRequest {
    pub season_name: Option<String>,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub season_number: i64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub auction_date: String,
    /// Make this the active season, retiring the others. Defaults to `true`.
    pub activate: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResponse {
    pub id: Uuid,
    pub season_name: Option<String>,
    pub year: String,
    pub season_number: i32,
    pub start_date: String,
    pub end_date: String,
    pub auction_date: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<season::Model> for SeasonResponse {
    fn from(s: season::Model) -> Self {
        Self {
            id: s.id,
            season_name: s.season_name,
            year: s.year,
            season_number: s.season_number,
            start_date: s.start_date.to_rfc3339(),
            end_date: s.end_date.to_rfc3339(),
            auction_date: s.auction_date.to_rfc3339(),
            is_active: s.is_active,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}
