mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use inkwell::api::DbSession;
use inkwell::db::Database;
use inkwell::entities::users;
use inkwell::state::AppState;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::ServiceExt;

async fn spawn_app() -> (Arc<AppState>, Router) {
    let url = common::temp_db_url();
    let db = Database::with_pool_options(&url, 5, 1)
        .await
        .expect("failed to open test database");
    db.migrate().await.expect("failed to migrate");

    let state = Arc::new(AppState::new(common::test_settings(&url), db));
    let router = inkwell::api::router(state.clone());
    (state, router)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_root() {
    let (_, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"message": "hello world", "status": "ok"})
    );
}

#[tokio::test]
async fn test_root_body_is_exact() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    assert_eq!(&body[..], br#"{"message":"hello world","status":"ok"}"#);
}

#[tokio::test]
async fn test_read_item_echoes_integer() {
    let (_, app) = spawn_app().await;

    for n in [0_i64, 1, 42, -7, i64::MAX, i64::MIN] {
        let (status, body) = get_json(&app, &format!("/items/{n}")).await;

        assert_eq!(status, StatusCode::OK, "item {n}");
        assert_eq!(body, serde_json::json!({"item_id": n, "name": "测试商品"}));
    }
}

#[tokio::test]
async fn test_read_item_rejects_non_integer() {
    let (_, app) = spawn_app().await;

    for segment in ["abc", "1.5", "12abc", "99999999999999999999"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/items/{segment}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response.status().is_client_error(),
            "/items/{segment} returned {}",
            response.status()
        );
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_, app) = spawn_app().await;

    let (status, _) = get_json(&app, "/novels").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn count_users(mut session: DbSession) -> String {
    let tx = session.tx().await.unwrap();
    users::Entity::find().count(tx).await.unwrap().to_string()
}

#[tokio::test]
async fn test_db_session_extractor_closes_session() {
    let (state, _) = spawn_app().await;
    common::insert_user(&state.db, "extractor@example.com").await;

    let app = Router::new()
        .route("/users/count", get(count_users))
        .with_state(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/count")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"1");
    assert_eq!(state.db.open_sessions(), 0);
}
