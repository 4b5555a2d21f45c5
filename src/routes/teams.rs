use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;

use crate::auth::middleware::AdminSession;
use crate::dto::{CreateTeamRequest, PlayerResponse, RosterQuery, SeasonResponse, TeamResponse};
use crate::error::AppError;
use crate::services::TeamService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/{team_id}/players", get(team_roster))
}

async fn list_teams(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let teams: Vec<TeamResponse> = TeamService::list_active(&state.db)
        .await?
        .into_iter()
        .map(|(team, owner)| TeamResponse::new(team, owner))
        .collect();

    Ok(Json(json!({ "success": true, "data": teams })))
}

async fn create_team(
    State(state): State<AppState>,
    AdminSession(_): AdminSession,
    WithRejection(Json(req), _): WithRejection<Json<CreateTeamRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let (team, owner) = TeamService::create(&state.db, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "team": TeamResponse::new(team, Some(owner)),
        })),
    ))
}

async fn team_roster(
    State(state): State<AppState>,
    WithRejection(Path(team_id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<RosterQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let roster = TeamService::roster(&state.db, team_id, query.season_id).await?;
    let players: Vec<PlayerResponse> = roster.players.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "success": true,
        "team": TeamResponse::new(roster.team, None),
        "season": SeasonResponse::from(roster.season),
        "players": players,
        "totalSpent": roster.total_spent,
    })))
}
