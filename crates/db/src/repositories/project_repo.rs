//! Repository for the `projects` table.

use sqlx::PgExecutor;
use vitrail_core::types::DbId;

use crate::models::project::Project;
use crate::occ::{self, VersionedRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, uuid, version, dealership_id, name, status, approved, created_at, updated_at";

impl VersionedRecord for Project {
    const ENTITY: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides CRUD and status operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `draft` status, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        dealership_id: DbId,
        name: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (dealership_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(dealership_id)
            .bind(name)
            .fetch_one(exec)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        occ::find_by_id::<Project>(exec, id).await
    }

    /// List all projects, most recently created first.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(exec).await
    }

    /// List a dealership's projects, most recently created first.
    pub async fn list_for_dealership(
        exec: impl PgExecutor<'_>,
        dealership_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE dealership_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(dealership_id)
            .fetch_all(exec)
            .await
    }

    /// Conditionally set a project's status and derived `approved` flag.
    ///
    /// Returns `None` when zero rows matched (missing id or stale version).
    pub async fn set_status(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        status: &str,
        approved: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = $3,
                approved = $4,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(status)
            .bind(approved)
            .fetch_optional(exec)
            .await
    }

    /// Permanently delete a project. Administrative escape hatch only —
    /// the workflow never hard-deletes. Returns `true` if a row was removed.
    pub async fn hard_delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
