//! Inlay chat entity model and DTOs.
//!
//! The chat log is append-only and time-ordered. The sender is stored as a
//! nullable FK pair (`dealership_user_id` / `internal_user_id`, exactly one
//! set, CHECK-enforced); above the row mapping it is always the
//! [`Sender`] enum.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vitrail_core::actor::Sender;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `inlay_chats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InlayChat {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub inlay_id: DbId,
    pub message_type: String,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub dealership_user_id: Option<DbId>,
    pub internal_user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InlayChat {
    /// The message sender. `None` only if the row violates the one-sender
    /// CHECK constraint, which the schema prevents.
    pub fn sender(&self) -> Option<Sender> {
        Sender::from_columns(self.dealership_user_id, self.internal_user_id)
    }
}

/// Internal DTO for appending a chat entry.
#[derive(Debug, Clone)]
pub struct NewChatEntry {
    pub inlay_id: DbId,
    pub message_type: &'static str,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub sender: Sender,
}

/// Request body for posting a free-form message to an inlay's chat.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    /// `text` or `image`; the `proof_*` types are workflow-generated only.
    pub message_type: String,
    pub body: Option<String>,
    pub image_url: Option<String>,
}
