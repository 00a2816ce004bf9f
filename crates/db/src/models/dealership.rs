//! Dealership entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `dealerships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dealership {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dealership.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDealership {
    pub name: String,
}
