//! HTTP-level integration tests for project CRUD, scoping, and explicit
//! status transitions.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dealer_creates_project_in_own_dealership(pool: PgPool) {
    let actors = common::seed_actors(&pool, "pcreate").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Showroom doors" }),
        &actors.dealer_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Showroom doors");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["version"], 1);
    assert_eq!(
        json["data"]["dealership_id"].as_i64().unwrap(),
        actors.dealership_id
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn internal_actor_must_name_a_dealership(pool: PgPool) {
    let actors = common::seed_actors(&pool, "pint").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "No dealership" }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "With dealership", "dealership_id": actors.dealership_id }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_dealership_sees_404(pool: PgPool) {
    let owners = common::seed_actors(&pool, "owner").await;
    let others = common::seed_actors(&pool, "other").await;
    let (project_id, _) = common::seed_submitted_project(&pool, &owners, "Private lobby").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &others.dealer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Internal actors see everything.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &others.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_scoped_to_the_dealership(pool: PgPool) {
    let owners = common::seed_actors(&pool, "lista").await;
    let others = common::seed_actors(&pool, "listb").await;
    common::seed_submitted_project(&pool, &owners, "Mine").await;
    common::seed_submitted_project(&pool, &others, "Theirs").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects", &owners.dealer_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Mine"));
    assert!(!names.contains(&"Theirs"));
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_moves_draft_to_designing(pool: PgPool) {
    let actors = common::seed_actors(&pool, "submit").await;
    let (project_id, version) =
        common::seed_submitted_project(&pool, &actors, "Kitchen transom").await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &actors.dealer_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "designing");
    assert_eq!(json["data"]["version"].as_i64().unwrap(), version);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn skipping_states_is_rejected(pool: PgPool) {
    let actors = common::seed_actors(&pool, "skip").await;
    let (project_id, version) = common::seed_submitted_project(&pool, &actors, "Skipper").await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        serde_json::json!({ "status": "shipped", "project_version": version }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_version_transition_conflicts(pool: PgPool) {
    let actors = common::seed_actors(&pool, "stale").await;
    let (project_id, version) = common::seed_submitted_project(&pool, &actors, "Stale").await;

    // The caller's read is stale (submission already bumped the version).
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        serde_json::json!({ "status": "pending-approval", "project_version": version - 1 }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONCURRENCY_CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_is_a_validation_error(pool: PgPool) {
    let actors = common::seed_actors(&pool, "badstatus").await;
    let (project_id, version) = common::seed_submitted_project(&pool, &actors, "Bad").await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        serde_json::json!({ "status": "sideways", "project_version": version }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Administrative delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn hard_delete_is_internal_only(pool: PgPool) {
    let actors = common::seed_actors(&pool, "del").await;
    let (project_id, _) = common::seed_submitted_project(&pool, &actors, "Doomed").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
