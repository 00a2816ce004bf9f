//! Inlay entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vitrail_core::types::{DbId, Timestamp};

/// Inlay types: from the catalog, or a custom design.
pub const INLAY_TYPE_CATALOG: &str = "catalog";
pub const INLAY_TYPE_CUSTOM: &str = "custom";
pub const VALID_INLAY_TYPES: &[&str] = &[INLAY_TYPE_CATALOG, INLAY_TYPE_CUSTOM];

/// A row from the `inlays` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inlay {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub project_id: DbId,
    pub inlay_type: String,
    pub label: String,
    /// Mirrors the most recently created proof's design asset.
    pub preview_url: Option<String>,
    /// Set on approval; references a proof belonging to this inlay.
    pub approved_proof_id: Option<DbId>,
    /// Excluded inlays are ignored by the approval aggregator.
    pub excluded_from_order: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new inlay.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInlayRequest {
    pub inlay_type: String,
    pub label: String,
}

/// Request body for toggling an inlay's order exclusion.
#[derive(Debug, Clone, Deserialize)]
pub struct SetExclusionRequest {
    pub excluded_from_order: bool,
    pub inlay_version: i32,
}
