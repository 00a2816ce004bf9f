//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
///
/// `status` is stored as text; parse it with
/// `ProjectStatus::parse(&project.status)` at the point of use.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub dealership_id: DbId,
    pub name: String,
    pub status: String,
    /// Derived flag mirroring the aggregated approval state.
    pub approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project (always starts in `draft`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    /// Required for internal actors; dealership actors create projects in
    /// their own dealership and must omit it.
    pub dealership_id: Option<DbId>,
}

/// Request body for an explicit project status transition.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionProjectRequest {
    pub status: String,
    /// The project `version` the caller read; the write is conditional on it.
    pub project_version: i32,
}
