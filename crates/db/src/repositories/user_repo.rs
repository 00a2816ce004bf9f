//! Repository for the `dealership_users` and `internal_users` tables.
//!
//! Provisioning and authentication are external; these rows back the
//! `*_by` and chat-sender references.

use sqlx::PgExecutor;
use vitrail_core::types::DbId;

use crate::models::user::{
    CreateDealershipUser, CreateInternalUser, DealershipUser, InternalUser,
};
use crate::occ::{self, VersionedRecord};

const DEALERSHIP_USER_COLUMNS: &str =
    "id, uuid, version, dealership_id, display_name, email, created_at, updated_at";

const INTERNAL_USER_COLUMNS: &str =
    "id, uuid, version, display_name, email, created_at, updated_at";

impl VersionedRecord for DealershipUser {
    const ENTITY: &'static str = "DealershipUser";
    const TABLE: &'static str = "dealership_users";
    const COLUMNS: &'static str = DEALERSHIP_USER_COLUMNS;
}

impl VersionedRecord for InternalUser {
    const ENTITY: &'static str = "InternalUser";
    const TABLE: &'static str = "internal_users";
    const COLUMNS: &'static str = INTERNAL_USER_COLUMNS;
}

/// Provides CRUD operations for both user tables.
pub struct UserRepo;

impl UserRepo {
    /// Insert a dealership user, returning the created row.
    pub async fn create_dealership_user(
        exec: impl PgExecutor<'_>,
        input: &CreateDealershipUser,
    ) -> Result<DealershipUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO dealership_users (dealership_id, display_name, email)
             VALUES ($1, $2, $3)
             RETURNING {DEALERSHIP_USER_COLUMNS}"
        );
        sqlx::query_as::<_, DealershipUser>(&query)
            .bind(input.dealership_id)
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_one(exec)
            .await
    }

    /// Insert an internal user, returning the created row.
    pub async fn create_internal_user(
        exec: impl PgExecutor<'_>,
        input: &CreateInternalUser,
    ) -> Result<InternalUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO internal_users (display_name, email)
             VALUES ($1, $2)
             RETURNING {INTERNAL_USER_COLUMNS}"
        );
        sqlx::query_as::<_, InternalUser>(&query)
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_one(exec)
            .await
    }

    /// Find a dealership user by internal ID.
    pub async fn find_dealership_user(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<DealershipUser>, sqlx::Error> {
        occ::find_by_id::<DealershipUser>(exec, id).await
    }

    /// Find an internal user by internal ID.
    pub async fn find_internal_user(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<InternalUser>, sqlx::Error> {
        occ::find_by_id::<InternalUser>(exec, id).await
    }
}
