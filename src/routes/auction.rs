use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde_json::json;

use crate::auth::middleware::StaffSession;
use crate::dto::{
    AssignRequest, ListPlayersQuery, PlayerListItem, PlayerResponse, UnassignRequest,
    UpdateSaleRequest,
};
use crate::error::AppError;
use crate::services::{AuctionService, ListingRequest, ListingService, ListingView, Tab};
use crate::state::AppState;

/// Auction desk. Every route needs a staff session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players))
        .route("/assign", post(assign_player))
        .route("/sale", put(update_sale))
        .route("/unassign", post(unassign_player))
}

async fn list_players(
    State(state): State<AppState>,
    StaffSession(_): StaffSession,
    WithRejection(Query(query), _): WithRejection<Query<ListPlayersQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let tab = Tab::parse(ListingView::Auctioneer, query.tab.as_deref())?;

    let listing = ListingService::list(
        &state.db,
        ListingRequest {
            view: ListingView::Auctioneer,
            tab,
            season_id: query.season_id,
            viewer_team: None,
            search: query.search,
        },
        Utc::now(),
    )
    .await?;

    let players: Vec<PlayerListItem> = listing.players.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "success": true,
        "players": players,
        "isAuctionOver": listing.is_auction_over,
    })))
}

async fn assign_player(
    State(state): State<AppState>,
    StaffSession(_): StaffSession,
    WithRejection(Json(req), _): WithRejection<Json<AssignRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let player = AuctionService::assign(&state.db, req).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Player assigned successfully",
        "player": PlayerResponse::from(player),
    })))
}

async fn update_sale(
    State(state): State<AppState>,
    StaffSession(_): StaffSession,
    WithRejection(Json(req), _): WithRejection<Json<UpdateSaleRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let player = AuctionService::update_sale(&state.db, req).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Player updated successfully",
        "player": PlayerResponse::from(player),
    })))
}

async fn unassign_player(
    State(state): State<AppState>,
    StaffSession(_): StaffSession,
    WithRejection(Json(req), _): WithRejection<Json<UnassignRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let player = AuctionService::unassign(&state.db, req).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Player unassigned successfully",
        "player": PlayerResponse::from(player),
    })))
}
