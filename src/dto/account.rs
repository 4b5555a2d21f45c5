use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{owner, user};

// ============ Request DTOs ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOwnerRequest {
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_email: String,
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub owner_password: String,
}

/// Staff account creation. `role` is `ADMIN` or `AUCTIONEER`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: String,
}

// ============ Response DTOs ============

/// Who is logged in. Staff carry `role`, owners carry `teamId`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<owner::Model> for OwnerResponse {
    fn from(o: owner::Model) -> Self {
        Self {
            id: o.id,
            owner_name: o.owner_name,
            owner_email: o.owner_email,
            owner_phone: o.owner_phone,
            is_active: o.is_active,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}
