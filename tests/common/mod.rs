#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use serde_json::{Value, json};
use tower::ServiceExt;

use league_auction_api::config::{Config, Environment, ImageStoreConfig};
use league_auction_api::dto::{
    CreateOwnerRequest, CreateSeasonRequest, CreateTeamRequest, CreateUserRequest, PhotoUpload,
    RegistrationForm,
};
use league_auction_api::entities::{owner, player, season, team, user};
use league_auction_api::services::{AccountService, RegistrationService, SeasonService, TeamService};
use league_auction_api::state::AppState;
use league_auction_api::storage::{ImagePayload, ImageStore};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const PASSWORD: &str = "secret123";
pub const BOUNDARY: &str = "----league-test-boundary";

/// Image store that keeps uploads in memory and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub uploads: Mutex<Vec<(String, ImagePayload)>>,
    pub fail: bool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.uploads.lock().map(|u| u.len()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ImageStore for RecordingStore {
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> anyhow::Result<String> {
        if self.fail {
            return Err(anyhow::anyhow!("image service unavailable"));
        }
        let mut uploads = self
            .uploads
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?;
        uploads.push((folder.to_string(), payload.clone()));
        Ok(format!(
            "https://images.test/{folder}/{}.{}",
            uploads.len(),
            payload.extension()
        ))
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub images: Arc<RecordingStore>,
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        session_ttl_secs: 3600,
        frontend_url: "http://localhost:3001".to_string(),
        image_store: ImageStoreConfig::Local {
            upload_dir: "test_uploads".into(),
            public_base_url: "http://127.0.0.1:3000".to_string(),
        },
        bootstrap_admin: None,
    }
}

/// Build the app router backed by an in-memory `SQLite` database with migrations.
pub async fn test_app() -> TestApp {
    test_app_with_store(RecordingStore::default()).await
}

pub async fn test_app_with_store(store: RecordingStore) -> TestApp {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();

    let images = Arc::new(store);
    let state = AppState {
        db,
        config: test_config(),
        images: images.clone(),
    };

    TestApp {
        router: league_auction_api::routes::router().with_state(state.clone()),
        state,
        images,
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

// ──────────────────────────────────────────────────────────────────────────────
// Requests
// ──────────────────────────────────────────────────────────────────────────────

/// Send a request and return (status, `Set-Cookie` value if any, JSON body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, set_cookie, json)
}

fn with_cookie(builder: axum::http::request::Builder, cookie: Option<&str>) -> axum::http::request::Builder {
    match cookie {
        Some(c) => builder.header(header::COOKIE, c),
        None => builder,
    }
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
    let request = with_cookie(Request::builder().method("GET").uri(uri), cookie)
        .body(Body::empty())
        .unwrap_or_default();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

pub async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: &Value,
    cookie: Option<&str>,
) -> (StatusCode, Value) {
    let request = with_cookie(Request::builder().method(method).uri(uri), cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_default();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: &Value, cookie: Option<&str>) -> (StatusCode, Value) {
    json_request(app, "POST", uri, body, cookie).await
}

/// Encode text fields and an optional `photo` file as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], photo: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"photo\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn multipart_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Vec<u8>,
    cookie: Option<&str>,
) -> (StatusCode, Value) {
    let request = with_cookie(Request::builder().method(method).uri(uri), cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap_or_default();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

/// Log in and return the `auth_token=...` pair for the `Cookie` header.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": email, "password": password }).to_string()))
        .unwrap_or_default();
    let (status, set_cookie, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    set_cookie
        .and_then(|c| c.split(';').next().map(str::to_string))
        .unwrap_or_default()
}

// ──────────────────────────────────────────────────────────────────────────────
// Seed data
// ──────────────────────────────────────────────────────────────────────────────

pub async fn seed_user(app: &TestApp, email: &str, role: &str) -> user::Model {
    AccountService::create_user(
        &app.state.db,
        CreateUserRequest {
            name: "Staff Member".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            phone: None,
            role: role.to_string(),
        },
    )
    .await
    .unwrap_or_else(|e| unreachable_model(&e))
}

pub async fn seed_owner(app: &TestApp, email: &str) -> owner::Model {
    AccountService::create_owner(
        &app.state.db,
        CreateOwnerRequest {
            owner_name: "Team Owner".to_string(),
            owner_email: email.to_string(),
            owner_phone: None,
            owner_password: PASSWORD.to_string(),
        },
    )
    .await
    .unwrap_or_else(|e| unreachable_model(&e))
}

pub async fn seed_team(app: &TestApp, owner: &owner::Model, name: &str) -> team::Model {
    TeamService::create(
        &app.state.db,
        CreateTeamRequest {
            team_name: name.to_string(),
            owner_id: owner.id.to_string(),
            team_image: None,
        },
    )
    .await
    .map(|(team, _)| team)
    .unwrap_or_else(|e| unreachable_model(&e))
}

/// Season running December 2025 with the auction on the given day.
pub async fn seed_season(app: &TestApp, number: i64, auction_date: &str) -> season::Model {
    SeasonService::create(
        &app.state.db,
        CreateSeasonRequest {
            season_name: Some(format!("HPL Season {number}")),
            year: "2025".to_string(),
            season_number: number,
            start_date: "2025-12-01".to_string(),
            end_date: "2025-12-31".to_string(),
            auction_date: auction_date.to_string(),
            activate: Some(true),
        },
    )
    .await
    .unwrap_or_else(|e| unreachable_model(&e))
}

/// Seeding failures abort the test with the service error.
#[allow(clippy::panic)]
fn unreachable_model<T>(e: &league_auction_api::services::ServiceError) -> T {
    panic!("seeding failed: {e:?}")
}

pub fn registration_form(season_id: uuid::Uuid, name: &str, phone: &str) -> RegistrationForm {
    RegistrationForm {
        name: name.to_string(),
        father_name: "Father Name".to_string(),
        phone: phone.to_string(),
        role: "Batsman".to_string(),
        batting_style: Some("Right-hand".to_string()),
        bowling_style: Some(String::new()),
        age: "24".to_string(),
        address: "Main Road".to_string(),
        panchayat: "Rampur".to_string(),
        season_id: season_id.to_string(),
        photo: Some(PhotoUpload {
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        }),
    }
}

/// Register a player through the service as of `now`, without the admin override.
pub async fn seed_player(
    app: &TestApp,
    season: &season::Model,
    name: &str,
    phone: &str,
    now: DateTime<Utc>,
) -> player::Model {
    RegistrationService::register(
        &app.state.db,
        app.images.as_ref(),
        registration_form(season.id, name, phone),
        now,
        false,
    )
    .await
    .unwrap_or_else(|e| unreachable_model(&e))
}

/// Season whose auction is far in the future, so registration over HTTP is open.
pub async fn seed_open_season(app: &TestApp) -> season::Model {
    SeasonService::create(
        &app.state.db,
        CreateSeasonRequest {
            season_name: None,
            year: "2099".to_string(),
            season_number: 1,
            start_date: "2099-01-01".to_string(),
            end_date: "2099-12-31".to_string(),
            auction_date: "2099-06-01".to_string(),
            activate: Some(true),
        },
    )
    .await
    .unwrap_or_else(|e| unreachable_model(&e))
}
