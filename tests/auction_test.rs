mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{PASSWORD, utc};
use league_auction_api::dto::{AssignRequest, UnassignRequest, UpdateSaleRequest};
use league_auction_api::entities::{player, season, team};
use league_auction_api::services::{AuctionService, ServiceError};

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

/// One season, two teams, one registered player, and a logged-in auctioneer.
struct Desk {
    app: common::TestApp,
    season: season::Model,
    royals: team::Model,
    kings: team::Model,
    player: player::Model,
    cookie: String,
}

async fn desk() -> Desk {
    let app = common::test_app().await;
    let season = common::seed_season(&app, 1, "2025-12-21").await;
    let owner = common::seed_owner(&app, "owner@hpl.in").await;
    let royals = common::seed_team(&app, &owner, "Royals").await;
    let kings = common::seed_team(&app, &owner, "Kings").await;
    let player = common::seed_player(&app, &season, "Ravi", "9876543210", utc(2025, 12, 10, 0)).await;
    common::seed_user(&app, "auction@hpl.in", "AUCTIONEER").await;
    let cookie = common::login(&app.router, "auction@hpl.in", PASSWORD).await;

    Desk {
        app,
        season,
        royals,
        kings,
        player,
        cookie,
    }
}

async fn assign(d: &Desk, team_id: uuid::Uuid, price: i64) -> (StatusCode, serde_json::Value) {
    common::post_json(
        &d.app.router,
        "/api/v1/auction/assign",
        &json!({ "playerId": d.player.id, "teamId": team_id, "price": price }),
        Some(&d.cookie),
    )
    .await
}

// ──────────────────────────────────────────────────────────────────────────────
// Assign
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn assign_over_http() {
    let d = desk().await;

    let (status, json) = common::post_json(
        &d.app.router,
        "/api/v1/auction/assign",
        &json!({ "playerId": d.player.id, "teamId": d.royals.id, "price": 1500 }),
        Some(&d.cookie),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["message"], "Player assigned successfully");
    assert_eq!(json["player"]["teamId"], d.royals.id.to_string());
    assert_eq!(json["player"]["price"], 1500);
}

#[tokio::test]
async fn assign_validates_in_order() {
    let d = desk().await;
    let db = &d.app.state.db;

    let cases = [
        (Some(d.player.id), Some(d.royals.id), Some(0), "Invalid player price"),
        (Some(d.player.id), Some(d.royals.id), None, "Invalid player price"),
        (None, Some(d.royals.id), Some(100), "playerId is required"),
        (Some(d.player.id), None, Some(100), "Invalid input"),
        (Some(uuid::Uuid::new_v4()), Some(d.royals.id), Some(100), "Player not found"),
        (Some(d.player.id), Some(uuid::Uuid::new_v4()), Some(100), "Team not found"),
    ];

    for (player_id, team_id, price, expected) in cases {
        let result = AuctionService::assign(
            db,
            AssignRequest {
                player_id,
                team_id,
                price,
            },
        )
        .await;
        assert_eq!(
            result.err().map(|e| e.to_string()).unwrap_or_default(),
            expected
        );
    }
}

#[tokio::test]
async fn sold_player_must_be_unassigned_before_reassigning() {
    let d = desk().await;

    let (status, _) = assign(&d, d.royals.id, 1000).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = assign(&d, d.kings.id, 2000).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Player is already sold; unassign first");

    let (status, json) = common::post_json(
        &d.app.router,
        "/api/v1/auction/unassign",
        &json!({ "playerId": d.player.id }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Player unassigned successfully");
    assert_eq!(json["player"]["teamId"], serde_json::Value::Null);
    assert_eq!(json["player"]["price"], serde_json::Value::Null);

    let (status, json) = assign(&d, d.kings.id, 2000).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["player"]["teamId"], d.kings.id.to_string());
    assert_eq!(json["player"]["price"], 2000);
}

#[tokio::test]
async fn unassign_can_keep_the_price() {
    let d = desk().await;
    let db = &d.app.state.db;
    let sold = AuctionService::assign(
        db,
        AssignRequest {
            player_id: Some(d.player.id),
            team_id: Some(d.royals.id),
            price: Some(900),
        },
    )
    .await;
    assert!(sold.is_ok());

    let kept = AuctionService::unassign(
        db,
        UnassignRequest {
            player_id: Some(d.player.id),
            reset_price: Some(false),
        },
    )
    .await
    .ok();
    assert_eq!(kept.as_ref().map(|p| p.team_id), Some(None));
    assert_eq!(kept.map(|p| p.price), Some(Some(900)));

    let missing = AuctionService::unassign(
        db,
        UnassignRequest {
            player_id: None,
            reset_price: None,
        },
    )
    .await;
    assert!(matches!(missing, Err(ServiceError::PlayerIdRequired)));
}

// ──────────────────────────────────────────────────────────────────────────────
// Sale corrections
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_sale_moves_a_sold_player() {
    let d = desk().await;
    let db = &d.app.state.db;

    let unsold = AuctionService::update_sale(
        db,
        UpdateSaleRequest {
            player_id: Some(d.player.id),
            team_id: Some(d.kings.id),
            price: Some(1200),
        },
    )
    .await;
    assert!(matches!(unsold, Err(ServiceError::NotSold)));

    let incomplete = AuctionService::update_sale(
        db,
        UpdateSaleRequest {
            player_id: Some(d.player.id),
            team_id: None,
            price: Some(1200),
        },
    )
    .await;
    assert!(matches!(incomplete, Err(ServiceError::InvalidInput)));

    let sold = AuctionService::assign(
        db,
        AssignRequest {
            player_id: Some(d.player.id),
            team_id: Some(d.royals.id),
            price: Some(1000),
        },
    )
    .await;
    assert!(sold.is_ok());

    let (status, json) = common::json_request(
        &d.app.router,
        "PUT",
        "/api/v1/auction/sale",
        &json!({ "playerId": d.player.id, "teamId": d.kings.id, "price": 1200 }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["message"], "Player updated successfully");
    assert_eq!(json["player"]["teamId"], d.kings.id.to_string());
    assert_eq!(json["player"]["price"], 1200);
}

#[tokio::test]
async fn roster_totals_the_team_spend() {
    let d = desk().await;
    let db = &d.app.state.db;
    let second =
        common::seed_player(&d.app, &d.season, "Amit", "9123456789", utc(2025, 12, 10, 0)).await;

    for (player_id, price) in [(d.player.id, 1000), (second.id, 750)] {
        let sold = AuctionService::assign(
            db,
            AssignRequest {
                player_id: Some(player_id),
                team_id: Some(d.royals.id),
                price: Some(price),
            },
        )
        .await;
        assert!(sold.is_ok());
    }

    let uri = format!("/api/v1/teams/{}/players", d.royals.id);
    let (status, json) = common::get(&d.app.router, &uri, None).await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["team"]["teamName"], "Royals");
    assert_eq!(json["season"]["id"], d.season.id.to_string());
    assert_eq!(json["totalSpent"], 1750);
    assert_eq!(json["players"][0]["name"], "Amit");
    assert_eq!(json["players"][1]["name"], "Ravi");

    let uri = format!("/api/v1/teams/{}/players", d.kings.id);
    let (_, json) = common::get(&d.app.router, &uri, None).await;
    assert_eq!(json["totalSpent"], 0);
    assert_eq!(json["players"], json!([]));
}

// ──────────────────────────────────────────────────────────────────────────────
// Player edits
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn phone_edit_keeps_season_numbers_unique() {
    let d = desk().await;
    common::seed_player(&d.app, &d.season, "Amit", "9123456789", utc(2025, 12, 10, 0)).await;
    let uri = format!("/api/v1/players/{}/phone", d.player.id);

    let (status, json) = common::json_request(
        &d.app.router,
        "PATCH",
        &uri,
        &json!({ "phone": "9123456789" }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Phone number already in use");

    let (status, json) = common::json_request(
        &d.app.router,
        "PATCH",
        &uri,
        &json!({ "phone": "12345" }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PHONE");

    // Re-saving its own number is not a conflict
    let (status, json) = common::json_request(
        &d.app.router,
        "PATCH",
        &uri,
        &json!({ "phone": " 9876543210 " }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["player"]["phone"], "9876543210");
}

#[tokio::test]
async fn role_edit_is_normalized() {
    let d = desk().await;
    let uri = format!("/api/v1/players/{}/role", d.player.id);

    let (status, json) = common::json_request(
        &d.app.router,
        "PATCH",
        &uri,
        &json!({ "role": "Wicket-Keeper  Batsman" }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["player"]["role"], "wicket keeper batsman");

    let (status, json) = common::json_request(
        &d.app.router,
        "PATCH",
        &uri,
        &json!({ "role": "umpire" }),
        Some(&d.cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid player role");
}

#[tokio::test]
async fn photo_edit_uploads_and_repoints() {
    let d = desk().await;
    let uri = format!("/api/v1/players/{}/photo", d.player.id);

    let body = common::multipart_body(&[], Some(("image/png", PNG)));
    let (status, json) =
        common::multipart_request(&d.app.router, "PUT", &uri, body, Some(&d.cookie)).await;

    assert_eq!(status, StatusCode::OK, "{json}");
    // Registration made upload 1
    assert_eq!(json["player"]["photoUrl"], "https://images.test/players/2.png");
    assert_eq!(d.app.images.count(), 2);

    let body = common::multipart_body(&[("note", "no file")], None);
    let (status, _) =
        common::multipart_request(&d.app.router, "PUT", &uri, body, Some(&d.cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ──────────────────────────────────────────────────────────────────────────────
// Access
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn auction_desk_is_staff_only() {
    let d = desk().await;
    let owner_cookie = common::login(&d.app.router, "owner@hpl.in", PASSWORD).await;
    let body = json!({ "playerId": d.player.id, "teamId": d.royals.id, "price": 100 });

    let (status, json) =
        common::post_json(&d.app.router, "/api/v1/auction/assign", &body, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);

    let (status, _) =
        common::post_json(&d.app.router, "/api/v1/auction/assign", &body, Some(&owner_cookie))
            .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/v1/players/{}/role", d.player.id);
    let (status, _) = common::json_request(
        &d.app.router,
        "PATCH",
        &uri,
        &json!({ "role": "bowler" }),
        Some(&owner_cookie),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ──────────────────────────────────────────────────────────────────────────────
// Malformed requests
// ──────────────────────────────────────────────────────────────────────────────

fn assert_bad_request(status: StatusCode, json: &serde_json::Value, message: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["message"], message);
}

#[tokio::test]
async fn malformed_json_bodies_are_structured() {
    let d = desk().await;

    let (status, json) = common::post_json(
        &d.app.router,
        "/api/v1/auction/assign",
        &json!({ "playerId": "abc", "teamId": d.royals.id, "price": 500 }),
        Some(&d.cookie),
    )
    .await;
    assert_bad_request(status, &json, "Invalid request body");

    let (status, json) = common::post_json(
        &d.app.router,
        "/api/v1/auction/assign",
        &json!({ "playerId": d.player.id, "teamId": d.royals.id, "price": "500" }),
        Some(&d.cookie),
    )
    .await;
    assert_bad_request(status, &json, "Invalid request body");

    // Nothing was sold by either attempt
    let (status, _) = assign(&d, d.royals.id, 500).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_player_id_is_structured() {
    let d = desk().await;

    let (status, json) = common::json_request(
        &d.app.router,
        "PATCH",
        "/api/v1/players/not-a-uuid/phone",
        &json!({ "phone": "9000000000" }),
        Some(&d.cookie),
    )
    .await;
    assert_bad_request(status, &json, "Invalid path parameter");
}

#[tokio::test]
async fn malformed_multipart_is_structured() {
    let d = desk().await;
    let uri = format!("/api/v1/players/{}/photo", d.player.id);

    let (status, json) =
        common::json_request(&d.app.router, "PUT", &uri, &json!({}), Some(&d.cookie)).await;
    assert_bad_request(status, &json, "Invalid multipart data");

    // Stream ends inside the file part
    let mut body = common::multipart_body(&[], Some(("image/png", PNG)));
    let closing = format!("\r\n--{}--\r\n", common::BOUNDARY).len();
    body.truncate(body.len() - closing);
    let (status, json) =
        common::multipart_request(&d.app.router, "PUT", &uri, body, Some(&d.cookie)).await;
    assert_bad_request(status, &json, "Invalid multipart data");
    assert_eq!(d.app.images.count(), 1);
}
