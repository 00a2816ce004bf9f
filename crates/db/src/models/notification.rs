//! Notification entity model.
//!
//! The workflow writes these rows as a side effect of proof transitions;
//! delivery (email, push) is an external consumer's responsibility.

use serde::Serialize;
use sqlx::FromRow;
use vitrail_core::types::{DbId, Timestamp};

/// Audience values for notifications.
pub const AUDIENCE_DEALERSHIP: &str = "dealership";
pub const AUDIENCE_INTERNAL: &str = "internal";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub project_id: DbId,
    pub inlay_id: Option<DbId>,
    pub event_type: String,
    pub audience: String,
    pub body: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Internal DTO for emitting a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub project_id: DbId,
    pub inlay_id: Option<DbId>,
    pub event_type: &'static str,
    pub audience: &'static str,
    pub body: String,
}
