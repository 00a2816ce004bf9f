//! Integration tests for the versioned entity store contract.
//!
//! - version starts at 1 on insert and increases by exactly 1 per update
//! - a write with a stale version fails and leaves the row unchanged
//! - re-reading without intervening writes is idempotent

mod common;

use sqlx::PgPool;
use vitrail_core::project_status::ProjectStatus;
use vitrail_db::repositories::{InlayRepo, ProjectRepo};

// ---------------------------------------------------------------------------
// Test: inserts start at version 1
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_starts_at_version_one(pool: PgPool) {
    let fx = common::seed_project(&pool, "v1").await;

    // The project was updated once by submission (draft -> designing).
    assert_eq!(fx.project.version, 2);
    assert_eq!(fx.inlay.version, 1);
    assert_eq!(fx.dealership.version, 1);
}

// ---------------------------------------------------------------------------
// Test: each successful update bumps version by exactly one
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_version_is_monotonic(pool: PgPool) {
    let fx = common::seed_project(&pool, "mono").await;

    let mut inlay = fx.inlay;
    for n in 0..4 {
        let excluded = n % 2 == 0;
        inlay = InlayRepo::set_exclusion(&pool, inlay.id, inlay.version, excluded)
            .await
            .unwrap()
            .expect("current version must match");
        assert_eq!(inlay.version, n + 2);
    }

    // 1 insert + 4 updates.
    assert_eq!(inlay.version, 5);
}

// ---------------------------------------------------------------------------
// Test: a stale version fails closed and mutates nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_version_update_fails_without_mutation(pool: PgPool) {
    let fx = common::seed_project(&pool, "stale").await;

    let before = ProjectRepo::find_by_id(&pool, fx.project.id)
        .await
        .unwrap()
        .unwrap();

    // Stale version: the row is at 2, the caller claims 1.
    let result = ProjectRepo::set_status(
        &pool,
        fx.project.id,
        1,
        ProjectStatus::PendingApproval.as_str(),
        false,
    )
    .await
    .unwrap();
    assert!(result.is_none(), "stale write must match zero rows");

    let after = ProjectRepo::find_by_id(&pool, fx.project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, before.status);
    assert_eq!(after.version, before.version);
    assert_eq!(after.updated_at, before.updated_at);
}

// ---------------------------------------------------------------------------
// Test: a vanished row also fails closed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_deleted_row_matches_zero_rows(pool: PgPool) {
    let fx = common::seed_project(&pool, "gone").await;

    assert!(ProjectRepo::hard_delete(&pool, fx.project.id).await.unwrap());

    let result = ProjectRepo::set_status(
        &pool,
        fx.project.id,
        fx.project.version,
        ProjectStatus::Cancelled.as_str(),
        false,
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: uuid is a stable external alias for the same row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uuid_lookup_matches_id_lookup(pool: PgPool) {
    let fx = common::seed_project(&pool, "uuid").await;

    let by_id: vitrail_db::models::inlay::Inlay =
        vitrail_db::occ::find_by_id(&pool, fx.inlay.id)
            .await
            .unwrap()
            .unwrap();
    let by_uuid: vitrail_db::models::inlay::Inlay =
        vitrail_db::occ::find_by_uuid(&pool, by_id.uuid)
            .await
            .unwrap()
            .unwrap();

    assert_eq!(by_id.id, by_uuid.id);
    assert_eq!(by_id.version, by_uuid.version);
}

// ---------------------------------------------------------------------------
// Test: idempotent re-read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_re_read_is_idempotent(pool: PgPool) {
    let fx = common::seed_project(&pool, "reread").await;

    let first = InlayRepo::find_by_id(&pool, fx.inlay.id)
        .await
        .unwrap()
        .unwrap();
    let second = InlayRepo::find_by_id(&pool, fx.inlay.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.uuid, second.uuid);
    assert_eq!(first.version, second.version);
    assert_eq!(first.preview_url, second.preview_url);
    assert_eq!(first.updated_at, second.updated_at);
}
