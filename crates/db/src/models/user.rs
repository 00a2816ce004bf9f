//! Dealership-side and internal user models.
//!
//! User provisioning and authentication live outside this system; these rows
//! exist so `*_by` and chat-sender columns have something to reference.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `dealership_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DealershipUser {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub dealership_id: DbId,
    pub display_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `internal_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InternalUser {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub display_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a dealership user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDealershipUser {
    pub dealership_id: DbId,
    pub display_name: String,
    pub email: String,
}

/// DTO for creating an internal user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInternalUser {
    pub display_name: String,
    pub email: String,
}
