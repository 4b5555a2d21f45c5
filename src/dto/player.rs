use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::player;

// ============ Request DTOs ============

/// Raw registration form as submitted. Every text field arrives as a string and
/// is validated by the registration service.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub role: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub age: String,
    pub address: String,
    pub panchayat: String,
    pub season_id: String,
    pub photo: Option<PhotoUpload>,
}

/// An uploaded image file, straight off the multipart stream.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlayersQuery {
    pub season_id: Option<Uuid>,
    pub tab: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhoneRequest {
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role: String,
}

// ============ Response DTOs ============

/// Full player record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: Uuid,
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub age: i32,
    pub role: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub panchayat: String,
    pub address: String,
    pub photo_url: Option<String>,
    pub season_id: Uuid,
    pub team_id: Option<Uuid>,
    pub price: Option<i64>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<player::Model> for PlayerResponse {
    fn from(p: player::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            father_name: p.father_name,
            phone: p.phone,
            age: p.age,
            role: p.role,
            batting_style: p.batting_style,
            bowling_style: p.bowling_style,
            panchayat: p.panchayat,
            address: p.address,
            photo_url: p.photo_url,
            season_id: p.season_id,
            team_id: p.team_id,
            price: p.price,
            is_active: p.is_active,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// Row shown in player lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub role: String,
    pub panchayat: String,
    pub team_id: Option<Uuid>,
    pub price: Option<i64>,
    pub photo_url: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub age: i32,
}

impl From<player::Model> for PlayerListItem {
    fn from(p: player::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            phone: p.phone,
            role: p.role,
            panchayat: p.panchayat,
            team_id: p.team_id,
            price: p.price,
            photo_url: p.photo_url,
            batting_style: p.batting_style,
            bowling_style: p.bowling_style,
            age: p.age,
        }
    }
}
