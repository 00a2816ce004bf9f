//! Manufacturing milestone entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `inlay_milestones` table. Append-only: advancement is
/// always a new row, never an update to a prior one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InlayMilestone {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub inlay_id: DbId,
    pub step: String,
    pub event_type: String,
    pub performed_by: DbId,
    pub notes: Option<String>,
    pub event_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for appending a milestone event.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendMilestoneRequest {
    pub step: String,
    pub event_type: String,
    pub notes: Option<String>,
    /// Defaults to NOW() when omitted (back-dated entries are allowed).
    pub event_time: Option<Timestamp>,
}

/// Request body for correcting a milestone's notes. Notes are the only
/// mutable field; step/event advancement is always a new row.
#[derive(Debug, Clone, Deserialize)]
pub struct CorrectNotesRequest {
    pub notes: String,
    pub milestone_version: i32,
}
