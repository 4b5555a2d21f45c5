use serde::Deserialize;
use uuid::Uuid;

/// First sale of an unsold player.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub player_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub price: Option<i64>,
}

/// Correction of an existing sale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    pub player_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub price: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignRequest {
    pub player_id: Option<Uuid>,
    /// Defaults to `true`: the sale price is cleared along with the team.
    pub reset_price: Option<bool>,
}
