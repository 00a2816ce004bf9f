//! Repository for the `dealerships` table.

use sqlx::PgExecutor;
use vitrail_core::types::DbId;

use crate::models::dealership::Dealership;
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, name, created_at, updated_at";

impl VersionedRecord for Dealership {
    const ENTITY: &'static str = "Dealership";
    const TABLE: &'static str = "dealerships";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides CRUD operations for dealerships.
pub struct DealershipRepo;

impl DealershipRepo {
    /// Insert a new dealership, returning the created row.
    pub async fn create(exec: impl PgExecutor<'_>, name: &str) -> Result<Dealership, sqlx::Error> {
        let query = format!("INSERT INTO dealerships (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Dealership>(&query)
            .bind(name)
            .fetch_one(exec)
            .await
    }

    /// Find a dealership by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Dealership>, sqlx::Error> {
        occ::find_by_id::<Dealership>(exec, id).await
    }

    /// List all dealerships by name.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<Dealership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dealerships ORDER BY name");
        sqlx::query_as::<_, Dealership>(&query).fetch_all(exec).await
    }
}
