//! Shared test harness for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt::oneshot` to send requests directly to
//! the router without a TCP listener, and mirrors the production router
//! construction so tests exercise the same middleware stack.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vitrail_api::auth::jwt::{
    encode_token, JwtConfig, ACTOR_TYPE_DEALERSHIP, ACTOR_TYPE_INTERNAL,
};
use vitrail_api::config::ServerConfig;
use vitrail_api::router::build_app_router;
use vitrail_api::state::AppState;
use vitrail_db::models::user::{CreateDealershipUser, CreateInternalUser};
use vitrail_db::repositories::{DealershipRepo, UserRepo};
use vitrail_db::workflow::ProofWorkflow;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        workflow_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            expiry_hours: 1,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let workflow = ProofWorkflow::new(
        pool.clone(),
        Duration::from_secs(config.workflow_timeout_secs),
    );
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        workflow,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Actors and tokens
// ---------------------------------------------------------------------------

/// A seeded dealership with one user on each side, plus ready-made tokens.
pub struct Actors {
    pub dealership_id: i64,
    pub dealer_user_id: i64,
    pub internal_user_id: i64,
    pub dealer_token: String,
    pub internal_token: String,
}

/// Seed a dealership, a dealership user, and an internal user; return
/// bearer tokens for both.
pub async fn seed_actors(pool: &PgPool, tag: &str) -> Actors {
    let dealership = DealershipRepo::create(pool, &format!("Harbour Glass {tag}"))
        .await
        .unwrap();
    let dealer_user = UserRepo::create_dealership_user(
        pool,
        &CreateDealershipUser {
            dealership_id: dealership.id,
            display_name: "Robin Road".into(),
            email: format!("robin+{tag}@dealer.example"),
        },
    )
    .await
    .unwrap();
    let internal_user = UserRepo::create_internal_user(
        pool,
        &CreateInternalUser {
            display_name: "Sam Studio".into(),
            email: format!("sam+{tag}@vitrail.example"),
        },
    )
    .await
    .unwrap();

    let jwt = test_config().jwt;
    let dealer_token = encode_token(
        dealer_user.id,
        ACTOR_TYPE_DEALERSHIP,
        Some(dealership.id),
        &jwt,
    )
    .unwrap();
    let internal_token = encode_token(internal_user.id, ACTOR_TYPE_INTERNAL, None, &jwt).unwrap();

    Actors {
        dealership_id: dealership.id,
        dealer_user_id: dealer_user.id,
        internal_user_id: internal_user.id,
        dealer_token,
        internal_token,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    request(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    request(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    request(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    request(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Workflow fixtures over HTTP
// ---------------------------------------------------------------------------

/// Create a project via the API and submit it for design.
/// Returns `(project_id, project_version_after_submission)`.
pub async fn seed_submitted_project(pool: &PgPool, actors: &Actors, name: &str) -> (i64, i64) {
    let app = build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": name }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(created.status(), axum::http::StatusCode::CREATED);
    let project = body_json(created).await;
    let project_id = project["data"]["id"].as_i64().unwrap();
    let version = project["data"]["version"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let submitted = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        serde_json::json!({ "status": "designing", "project_version": version }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(submitted.status(), axum::http::StatusCode::OK);
    let project = body_json(submitted).await;

    (project_id, project["data"]["version"].as_i64().unwrap())
}

/// Add an inlay to a project via the API. Returns the inlay id.
pub async fn seed_inlay(pool: &PgPool, actors: &Actors, project_id: i64, label: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/inlays"),
        serde_json::json!({ "inlay_type": "custom", "label": label }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(created.status(), axum::http::StatusCode::CREATED);
    let inlay = body_json(created).await;
    inlay["data"]["id"].as_i64().unwrap()
}

/// Send a proof via the API, reading the inlay fresh for its version.
/// Returns the created proof JSON (`data` object of the response).
pub async fn seed_proof(
    pool: &PgPool,
    actors: &Actors,
    inlay_id: i64,
    asset_url: &str,
) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let inlay = body_json(get_auth(
        app,
        &format!("/api/v1/inlays/{inlay_id}"),
        &actors.internal_token,
    )
    .await)
    .await;
    let inlay_version = inlay["data"]["version"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        &format!("/api/v1/inlays/{inlay_id}/proofs"),
        serde_json::json!({
            "design_asset_url": asset_url,
            "inlay_version": inlay_version,
        }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(created.status(), axum::http::StatusCode::CREATED);
    body_json(created).await["data"].clone()
}
