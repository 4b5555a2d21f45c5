use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::{CookieJar, WithRejection};
use sea_orm::EntityTrait;
use serde_json::json;

use crate::auth::cookie::{removal_cookie, session_cookie};
use crate::auth::extract_client_ip;
use crate::auth::jwt::encode_session;
use crate::auth::middleware::{CurrentAccount, Session};
use crate::dto::LoginRequest;
use crate::entities::{owner, team, user};
use crate::error::AppError;
use crate::services::AccountService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let ip = extract_client_ip(&headers).unwrap_or_else(|| "unknown".to_string());

    let account = match AccountService::authenticate(&state.db, &req.email, &req.password).await {
        Ok(account) => account,
        Err(e) => {
            tracing::info!(%ip, reason = e.code(), "login rejected");
            return Err(e.into());
        }
    };

    let claims = account.session_claims(state.config.session_ttl_secs);
    let token = encode_session(&claims, &state.config.jwt_secret)?;
    let jar = jar.add(session_cookie(token, state.config.secure_cookies()));

    tracing::info!(
        %ip,
        account_id = %claims.sub,
        account_type = account.account_type(),
        "login succeeded"
    );

    Ok((
        jar,
        Json(json!({
            "success": true,
            "message": "Welcome to HPL!",
            "accountType": account.account_type(),
            "user": account.summary(),
        })),
    ))
}

/// Always succeeds, logged in or not.
async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(removal_cookie()),
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}

async fn me(
    State(state): State<AppState>,
    Session(account): Session,
) -> Result<impl IntoResponse, AppError> {
    let body = match account {
        CurrentAccount::Anonymous => json!({ "success": true, "isLoggedIn": false }),
        CurrentAccount::Staff { id, email, role } => {
            let name = user::Entity::find_by_id(id)
                .one(&state.db)
                .await?
                .map(|u| u.name);
            json!({
                "success": true,
                "isLoggedIn": true,
                "accountType": "USER",
                "user": { "id": id, "email": email, "name": name, "role": role.as_str() },
            })
        }
        CurrentAccount::Owner { id, email, team_id } => {
            let name = owner::Entity::find_by_id(id)
                .one(&state.db)
                .await?
                .map(|o| o.owner_name);
            let team_name = team::Entity::find_by_id(team_id)
                .one(&state.db)
                .await?
                .map(|t| t.team_name);
            json!({
                "success": true,
                "isLoggedIn": true,
                "accountType": "OWNER",
                "user": {
                    "id": id,
                    "email": email,
                    "name": name,
                    "teamId": team_id,
                    "teamName": team_name,
                },
            })
        }
    };

    Ok(Json(body))
}
