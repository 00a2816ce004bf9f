//! HTTP-level integration tests for the invoice lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

/// Bring a project to `approved` via the proof workflow and return
/// `(project_id, inlay_id)`.
async fn approved_project(pool: &PgPool, actors: &common::Actors, tag: &str) -> (i64, i64) {
    let (project_id, _) =
        common::seed_submitted_project(pool, actors, &format!("Invoice {tag}")).await;
    let inlay_id = common::seed_inlay(pool, actors, project_id, "Billable inlay").await;
    let proof = common::seed_proof(pool, actors, inlay_id, "https://a.example/inv.png").await;

    let app = common::build_test_app(pool.clone());
    let approved = post_json_auth(
        app,
        &format!("/api/v1/proofs/{}/approve", proof["proof"]["id"]),
        serde_json::json!({ "proof_version": proof["proof"]["version"] }),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(approved.status(), StatusCode::OK);

    (project_id, inlay_id)
}

/// Draft an invoice for a project, returning the invoice JSON.
async fn draft_invoice(
    pool: &PgPool,
    actors: &common::Actors,
    project_id: i64,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/invoices"),
        serde_json::json!({}),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Drafting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_requires_an_order_ready_project(pool: PgPool) {
    let actors = common::seed_actors(&pool, "inot").await;
    let (project_id, _) = common::seed_submitted_project(&pool, &actors, "Not ready").await;

    // Still designing: no invoice yet.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/invoices"),
        serde_json::json!({}),
        &actors.internal_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_carries_a_generated_number(pool: PgPool) {
    let actors = common::seed_actors(&pool, "inum").await;
    let (project_id, _) = approved_project(&pool, &actors, "num").await;

    let invoice = draft_invoice(&pool, &actors, project_id).await;
    assert_eq!(invoice["status"], "draft");
    assert_eq!(invoice["total_cents"], 0);
    assert!(invoice["invoice_number"]
        .as_str()
        .unwrap()
        .starts_with("INV-"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drafting_is_internal_only(pool: PgPool) {
    let actors = common::seed_actors(&pool, "iforb").await;
    let (project_id, _) = approved_project(&pool, &actors, "forb").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/invoices"),
        serde_json::json!({}),
        &actors.dealer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn line_items_update_the_total(pool: PgPool) {
    let actors = common::seed_actors(&pool, "iline").await;
    let (project_id, inlay_id) = approved_project(&pool, &actors, "line").await;
    let invoice = draft_invoice(&pool, &actors, project_id).await;
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/line-items"),
        serde_json::json!({
            "inlay_id": inlay_id,
            "description": "Custom rose medallion",
            "quantity": 2,
            "unit_price_cents": 48_000,
            "invoice_version": invoice["version"],
        }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["invoice"]["total_cents"], 96_000);
    assert_eq!(json["data"]["invoice"]["version"], 2);

    let app = common::build_test_app(pool);
    let items = body_json(get_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/line-items"),
        &actors.internal_token,
    )
    .await)
    .await;
    assert_eq!(items["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_invoice_version_conflicts(pool: PgPool) {
    let actors = common::seed_actors(&pool, "istale").await;
    let (project_id, _) = approved_project(&pool, &actors, "stale").await;
    let invoice = draft_invoice(&pool, &actors, project_id).await;
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/line-items"),
        serde_json::json!({
            "description": "Ghost line",
            "quantity": 1,
            "unit_price_cents": 100,
            "invoice_version": 9,
        }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn send_then_pay_happy_path(pool: PgPool) {
    let actors = common::seed_actors(&pool, "ipay").await;
    let (project_id, _) = approved_project(&pool, &actors, "pay").await;
    let invoice = draft_invoice(&pool, &actors, project_id).await;
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let sent = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/send"),
        serde_json::json!({ "invoice_version": invoice["version"] }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(sent.status(), StatusCode::OK);
    let sent = body_json(sent).await;
    assert_eq!(sent["data"]["status"], "sent");
    assert!(sent["data"]["issued_at"].is_string());

    let app = common::build_test_app(pool);
    let paid = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/pay"),
        serde_json::json!({ "invoice_version": sent["data"]["version"] }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(paid.status(), StatusCode::OK);
    let paid = body_json(paid).await;
    assert_eq!(paid["data"]["status"], "paid");
    assert!(paid["data"]["paid_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn line_items_freeze_after_send(pool: PgPool) {
    let actors = common::seed_actors(&pool, "ifreeze").await;
    let (project_id, _) = approved_project(&pool, &actors, "freeze").await;
    let invoice = draft_invoice(&pool, &actors, project_id).await;
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let sent = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/send"),
        serde_json::json!({ "invoice_version": invoice["version"] }),
        &actors.internal_token,
    )
    .await;
    let sent = body_json(sent).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/line-items"),
        serde_json::json!({
            "description": "Too late",
            "quantity": 1,
            "unit_price_cents": 100,
            "invoice_version": sent["data"]["version"],
        }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paying_a_draft_is_invalid(pool: PgPool) {
    let actors = common::seed_actors(&pool, "idraftpay").await;
    let (project_id, _) = approved_project(&pool, &actors, "draftpay").await;
    let invoice = draft_invoice(&pool, &actors, project_id).await;
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/pay"),
        serde_json::json!({ "invoice_version": invoice["version"] }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn voiding_a_draft_works(pool: PgPool) {
    let actors = common::seed_actors(&pool, "ivoid").await;
    let (project_id, _) = approved_project(&pool, &actors, "void").await;
    let invoice = draft_invoice(&pool, &actors, project_id).await;
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/invoices/{invoice_id}/void"),
        serde_json::json!({ "invoice_version": invoice["version"] }),
        &actors.internal_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "void");
    assert!(json["data"]["voided_at"].is_string());
}
