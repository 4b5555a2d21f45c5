use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::auth::middleware::AdminSession;
use crate::dto::{CreateUserRequest, UserResponse};
use crate::error::AppError;
use crate::services::AccountService;
use crate::state::AppState;

/// Staff account management.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

async fn create_user(
    State(state): State<AppState>,
    AdminSession(_): AdminSession,
    WithRejection(Json(req), _): WithRejection<Json<CreateUserRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let user = AccountService::create_user(&state.db, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "user": UserResponse::from(user),
        })),
    ))
}
