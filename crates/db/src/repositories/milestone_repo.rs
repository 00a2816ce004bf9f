//! Repository for the `inlay_milestones` table.
//!
//! Milestones are append-only: production advancement is always a new row.
//! The only update is a notes correction, which never touches step or
//! event type.

use sqlx::PgExecutor;
use vitrail_core::types::{DbId, Timestamp};

use crate::models::milestone::InlayMilestone;
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, inlay_id, step, event_type, performed_by, notes, \
                       event_time, created_at, updated_at";

impl VersionedRecord for InlayMilestone {
    const ENTITY: &'static str = "InlayMilestone";
    const TABLE: &'static str = "inlay_milestones";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides append and read operations for the milestone log.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Append a milestone event, returning the created row.
    pub async fn append(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
        step: &str,
        event_type: &str,
        performed_by: DbId,
        notes: Option<&str>,
        event_time: Option<Timestamp>,
    ) -> Result<InlayMilestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO inlay_milestones
                (inlay_id, step, event_type, performed_by, notes, event_time)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayMilestone>(&query)
            .bind(inlay_id)
            .bind(step)
            .bind(event_type)
            .bind(performed_by)
            .bind(notes)
            .bind(event_time)
            .fetch_one(exec)
            .await
    }

    /// Find a milestone event by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<InlayMilestone>, sqlx::Error> {
        occ::find_by_id::<InlayMilestone>(exec, id).await
    }

    /// List an inlay's milestone events in occurrence order.
    pub async fn list_for_inlay(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<Vec<InlayMilestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inlay_milestones WHERE inlay_id = $1 ORDER BY event_time, id"
        );
        sqlx::query_as::<_, InlayMilestone>(&query)
            .bind(inlay_id)
            .fetch_all(exec)
            .await
    }

    /// Conditionally correct a milestone's notes (typo fixes only).
    pub async fn correct_notes(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        notes: &str,
    ) -> Result<Option<InlayMilestone>, sqlx::Error> {
        let query = format!(
            "UPDATE inlay_milestones SET
                notes = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayMilestone>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(notes)
            .fetch_optional(exec)
            .await
    }
}
