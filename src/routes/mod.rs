mod auction;
mod auth;
mod health;
mod owners;
mod players;
mod seasons;
mod teams;
mod users;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health`: lightweight liveness check
/// - `/api/v1/health`: health check with database connectivity
/// - `/api/v1/auth`: login, logout, current account
/// - `/api/v1/seasons`, `/owners`, `/users`, `/teams`: registries
/// - `/api/v1/players`: registration, public listing, staff edits
/// - `/api/v1/auction`: auction desk listing and sales
pub fn router() -> Router<AppState> {
    let api_v1 = Router::new()
        .merge(health::api_router())
        .nest("/auth", auth::router())
        .nest("/seasons", seasons::router())
        .nest("/owners", owners::router())
        .nest("/users", users::router())
        .nest("/teams", teams::router())
        .nest("/players", players::router())
        .nest("/auction", auction::router());

    Router::new()
        .merge(health::root_router())
        .nest("/api/v1", api_v1)
}
