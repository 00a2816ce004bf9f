//! Production blocker entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `inlay_blockers` table. Open while `resolved_at` is null.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InlayBlocker {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub inlay_id: DbId,
    pub blocker_type: String,
    pub description: String,
    pub created_by: DbId,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub resolution_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InlayBlocker {
    pub fn is_open(&self) -> bool {
        self.resolved_at.is_none()
    }
}

/// Request body for raising a blocker on an inlay.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlockerRequest {
    pub blocker_type: String,
    #[validate(length(min = 1, message = "a blocker description is required"))]
    pub description: String,
}

/// Request body for resolving a blocker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveBlockerRequest {
    pub resolution_notes: Option<String>,
    pub blocker_version: i32,
}
