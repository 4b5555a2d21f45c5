use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::auth::middleware::AdminSession;
use crate::dto::{CreateOwnerRequest, OwnerResponse};
use crate::error::AppError;
use crate::services::AccountService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_owner))
}

async fn create_owner(
    State(state): State<AppState>,
    AdminSession(_): AdminSession,
    WithRejection(Json(req), _): WithRejection<Json<CreateOwnerRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let owner = AccountService::create_owner(&state.db, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "owner": OwnerResponse::from(owner),
        })),
    ))
}
