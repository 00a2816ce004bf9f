//! Inlay proof entity model and workflow request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `inlay_proofs` table.
///
/// `version_number` is the 1-based, dense, per-inlay design revision —
/// distinct from the generic OCC `version` counter every row carries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InlayProof {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub inlay_id: DbId,
    pub version_number: i32,
    pub status: String,
    pub design_asset_url: String,
    pub price_group_id: Option<DbId>,
    pub price_cents: Option<i64>,
    /// The chat entry that announced this proof.
    pub sent_in_chat_id: DbId,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<DbId>,
    pub declined_at: Option<Timestamp>,
    pub declined_by: Option<DbId>,
    pub decline_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a proof on an inlay.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProofRequest {
    #[validate(length(min = 1, message = "design_asset_url must not be empty"))]
    pub design_asset_url: String,
    pub price_group_id: Option<DbId>,
    pub price_cents: Option<i64>,
    /// The inlay `version` the caller read; the preview update is
    /// conditional on it.
    pub inlay_version: i32,
}

/// Request body for approving a pending proof.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveProofRequest {
    /// The proof `version` the caller read; the approval is conditional on it.
    pub proof_version: i32,
}

/// Request body for declining a pending proof.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeclineProofRequest {
    #[validate(length(min = 1, message = "a decline reason is required"))]
    pub reason: String,
    pub proof_version: i32,
}
