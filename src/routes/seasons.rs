use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::auth::middleware::AdminSession;
use crate::dto::{CreateSeasonRequest, SeasonResponse};
use crate::error::AppError;
use crate::services::SeasonService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_season))
        .route("/current", get(current_season))
}

async fn current_season(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let season = SeasonService::require_current(&state.db).await?;
    Ok(Json(json!({
        "success": true,
        "season": SeasonResponse::from(season),
    })))
}

async fn create_season(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    WithRejection(Json(req), _): WithRejection<Json<CreateSeasonRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let season = SeasonService::create(&state.db, req).await?;
    tracing::debug!(admin_id = %admin.id, season_id = %season.id, "season created by admin");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Season created successfully",
            "season": SeasonResponse::from(season),
        })),
    ))
}
