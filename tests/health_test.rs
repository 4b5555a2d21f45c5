mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn health_root_returns_200() {
    let app = common::test_app().await;
    let (status, json) = common::get(&app.router, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("database").is_none());
}

#[tokio::test]
async fn health_api_reports_database() {
    let app = common::test_app().await;
    let (status, json) = common::get(&app.router, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::test_app().await;
    let (status, _) = common::get(&app.router, "/api/v1/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
