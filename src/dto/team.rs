use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{owner, team};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub owner_id: String,
    pub team_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    pub season_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBrief {
    pub id: Uuid,
    pub owner_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub team_name: String,
    pub owner_id: Uuid,
    pub team_image: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerBrief>,
    pub created_at: String,
}

impl TeamResponse {
    #[must_use]
    pub fn new(t: team::Model, owner: Option<owner::Model>) -> Self {
        Self {
            id: t.id,
            team_name: t.team_name,
            owner_id: t.owner_id,
            team_image: t.team_image,
            is_active: t.is_active,
            owner: owner.map(|o| OwnerBrief {
                id: o.id,
                owner_name: o.owner_name,
            }),
            created_at: t.created_at.to_rfc3339(),
        }
    }
}
