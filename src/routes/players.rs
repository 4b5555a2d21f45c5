use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::auth::middleware::{AdminSession, CurrentAccount, OwnerSession, Session, StaffSession};
use crate::dto::{
    ListPlayersQuery, PhotoUpload, PlayerListItem, PlayerResponse, RegistrationForm,
    UpdatePhoneRequest, UpdateRoleRequest,
};
use crate::error::AppError;
use crate::services::{
    AuctionService, ListingRequest, ListingService, ListingView, RegistrationService,
    ServiceError, Tab,
};
use crate::state::AppState;
use crate::storage::MAX_PHOTO_BYTES;

/// Room for the photo plus the text fields of the form.
const UPLOAD_BODY_LIMIT: usize = MAX_PHOTO_BYTES + 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players))
        .route(
            "/register",
            post(register_player).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/{id}/phone", patch(update_phone))
        .route("/{id}/role", patch(update_role))
        .route(
            "/{id}/photo",
            put(update_photo).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

// ============================================================================
// Registration
// ============================================================================

async fn register_player(
    State(state): State<AppState>,
    Session(account): Session,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let form = read_registration(multipart).await?;
    let allow_late = admin_override(&state, &account).await?;

    let player = RegistrationService::register(
        &state.db,
        state.images.as_ref(),
        form,
        Utc::now(),
        allow_late,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Player registered successfully",
            "player": PlayerResponse::from(player),
        })),
    ))
}

/// Admins may register players after the registration window has closed.
async fn admin_override(state: &AppState, account: &CurrentAccount) -> Result<bool, AppError> {
    if !account.is_admin() {
        return Ok(false);
    }
    match AdminSession::resolve(&state.db, account).await {
        Ok(_) => Ok(true),
        Err(AppError::Internal(e)) => Err(AppError::Internal(e)),
        Err(_) => Ok(false),
    }
}

async fn read_registration(mut multipart: Multipart) -> Result<RegistrationForm, AppError> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photo" {
            form.photo = Some(read_photo(field).await?);
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "name" => form.name = value,
            "fatherName" => form.father_name = value,
            "phone" => form.phone = value,
            "role" => form.role = value,
            "battingStyle" => form.batting_style = Some(value),
            "bowlingStyle" => form.bowling_style = Some(value),
            "age" => form.age = value,
            "address" => form.address = value,
            "panchayat" => form.panchayat = value,
            "seasonId" => form.season_id = value,
            other => tracing::debug!(field = other, "ignoring unknown registration field"),
        }
    }

    Ok(form)
}

async fn read_photo(field: Field<'_>) -> Result<PhotoUpload, AppError> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await.map_err(multipart_error)?;

    Ok(PhotoUpload {
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::PhotoTooLarge.into()
    } else {
        tracing::debug!("Malformed multipart stream: {e}");
        AppError::BadRequest("Invalid multipart data".to_string())
    }
}

// ============================================================================
// Listing
// ============================================================================

async fn list_players(
    State(state): State<AppState>,
    Session(account): Session,
    WithRejection(Query(query), _): WithRejection<Query<ListPlayersQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let tab = Tab::parse(ListingView::Owner, query.tab.as_deref())?;

    // The viewer's team always comes from the session
    let viewer_team = if tab == Tab::Your {
        Some(OwnerSession::resolve(&state.db, &account).await?.team.id)
    } else {
        None
    };

    let listing = ListingService::list(
        &state.db,
        ListingRequest {
            view: ListingView::Owner,
            tab,
            season_id: query.season_id,
            viewer_team,
            search: query.search,
        },
        Utc::now(),
    )
    .await?;

    let players: Vec<PlayerListItem> = listing.players.into_iter().map(Into::into).collect();
    let mut body = json!({
        "success": true,
        "players": players,
        "isAuctionOver": listing.is_auction_over,
    });
    if tab == Tab::Your {
        body["noPlayersBought"] = json!(listing.no_players_bought);
    }

    Ok(Json(body))
}

// ============================================================================
// Staff edits
// ============================================================================

async fn update_phone(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdatePhoneRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let player = AuctionService::update_phone(&state.db, id, &req.phone).await?;
    tracing::info!(player_id = %player.id, staff_id = %staff.id, "player phone updated");

    Ok(Json(json!({
        "success": true,
        "message": "Phone number updated",
        "player": PlayerResponse::from(player),
    })))
}

async fn update_role(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateRoleRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let player = AuctionService::update_role(&state.db, id, &req.role).await?;
    tracing::info!(player_id = %player.id, staff_id = %staff.id, role = %player.role, "player role updated");

    Ok(Json(json!({
        "success": true,
        "message": "Player role updated",
        "player": PlayerResponse::from(player),
    })))
}

async fn update_photo(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(mut multipart, _): WithRejection<Multipart, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let mut photo = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if matches!(field.name(), Some("photo" | "file")) {
            photo = Some(read_photo(field).await?);
            break;
        }
    }
    let photo = photo.ok_or(ServiceError::MissingFields)?;

    let player =
        AuctionService::update_photo(&state.db, state.images.as_ref(), id, &photo).await?;
    tracing::info!(player_id = %player.id, staff_id = %staff.id, "player photo updated");

    Ok(Json(json!({
        "success": true,
        "message": "Player photo updated",
        "player": PlayerResponse::from(player),
    })))
}
