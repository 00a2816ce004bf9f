//! Repository for the `inlay_blockers` table.
//!
//! A blocker is open while `resolved_at IS NULL`. Blockers record, but do
//! not themselves gate, milestone progression.

use sqlx::PgExecutor;
use vitrail_core::types::DbId;

use crate::models::blocker::InlayBlocker;
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, inlay_id, blocker_type, description, created_by, \
                       resolved_at, resolved_by, resolution_notes, created_at, updated_at";

impl VersionedRecord for InlayBlocker {
    const ENTITY: &'static str = "InlayBlocker";
    const TABLE: &'static str = "inlay_blockers";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides open/resolve operations for production blockers.
pub struct BlockerRepo;

impl BlockerRepo {
    /// Raise a blocker on an inlay, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
        blocker_type: &str,
        description: &str,
        created_by: DbId,
    ) -> Result<InlayBlocker, sqlx::Error> {
        let query = format!(
            "INSERT INTO inlay_blockers (inlay_id, blocker_type, description, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayBlocker>(&query)
            .bind(inlay_id)
            .bind(blocker_type)
            .bind(description)
            .bind(created_by)
            .fetch_one(exec)
            .await
    }

    /// Find a blocker by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<InlayBlocker>, sqlx::Error> {
        occ::find_by_id::<InlayBlocker>(exec, id).await
    }

    /// List every blocker on an inlay, oldest first.
    pub async fn list_for_inlay(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<Vec<InlayBlocker>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM inlay_blockers WHERE inlay_id = $1 ORDER BY id");
        sqlx::query_as::<_, InlayBlocker>(&query)
            .bind(inlay_id)
            .fetch_all(exec)
            .await
    }

    /// List an inlay's unresolved blockers.
    pub async fn list_unresolved(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<Vec<InlayBlocker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inlay_blockers
             WHERE inlay_id = $1 AND resolved_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, InlayBlocker>(&query)
            .bind(inlay_id)
            .fetch_all(exec)
            .await
    }

    /// Whether the inlay has an open hard blocker.
    pub async fn has_open_hard_blocker(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM inlay_blockers
                WHERE inlay_id = $1 AND blocker_type = 'hard' AND resolved_at IS NULL
             )",
        )
        .bind(inlay_id)
        .fetch_one(exec)
        .await
    }

    /// Conditionally resolve an open blocker.
    ///
    /// The write also matches `resolved_at IS NULL`, so resolving an
    /// already-resolved blocker reports a conflict rather than overwriting
    /// the original resolution.
    pub async fn resolve(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        resolved_by: DbId,
        resolution_notes: Option<&str>,
    ) -> Result<Option<InlayBlocker>, sqlx::Error> {
        let query = format!(
            "UPDATE inlay_blockers SET
                resolved_at = NOW(),
                resolved_by = $3,
                resolution_notes = $4,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND resolved_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayBlocker>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(resolved_by)
            .bind(resolution_notes)
            .fetch_optional(exec)
            .await
    }
}
