//! Repository for the `inlays` table.

use sqlx::PgExecutor;
use vitrail_core::approval::InlayApprovalState;
use vitrail_core::types::DbId;

use crate::models::inlay::{CreateInlayRequest, Inlay};
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, project_id, inlay_type, label, preview_url, \
                       approved_proof_id, excluded_from_order, created_at, updated_at";

impl VersionedRecord for Inlay {
    const ENTITY: &'static str = "Inlay";
    const TABLE: &'static str = "inlays";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides CRUD and workflow operations for inlays.
pub struct InlayRepo;

impl InlayRepo {
    /// Insert a new inlay, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        project_id: DbId,
        input: &CreateInlayRequest,
    ) -> Result<Inlay, sqlx::Error> {
        let query = format!(
            "INSERT INTO inlays (project_id, inlay_type, label)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inlay>(&query)
            .bind(project_id)
            .bind(&input.inlay_type)
            .bind(&input.label)
            .fetch_one(exec)
            .await
    }

    /// Find an inlay by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Inlay>, sqlx::Error> {
        occ::find_by_id::<Inlay>(exec, id).await
    }

    /// List a project's inlays in creation order.
    pub async fn list_for_project(
        exec: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<Inlay>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inlays WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, Inlay>(&query)
            .bind(project_id)
            .fetch_all(exec)
            .await
    }

    /// The approval-relevant slice of every inlay in a project, for the
    /// aggregator. Reads, but does not lock, the sibling rows.
    pub async fn approval_states(
        exec: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<InlayApprovalState>, sqlx::Error> {
        let rows: Vec<(bool, Option<DbId>)> = sqlx::query_as(
            "SELECT excluded_from_order, approved_proof_id FROM inlays WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_all(exec)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(excluded_from_order, approved_proof_id)| InlayApprovalState {
                excluded_from_order,
                approved_proof_id,
            })
            .collect())
    }

    /// Conditionally set the inlay's preview to a new design asset.
    pub async fn set_preview(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        preview_url: &str,
    ) -> Result<Option<Inlay>, sqlx::Error> {
        let query = format!(
            "UPDATE inlays SET
                preview_url = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inlay>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(preview_url)
            .fetch_optional(exec)
            .await
    }

    /// Conditionally record the approved proof on the inlay.
    pub async fn set_approved_proof(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        proof_id: DbId,
    ) -> Result<Option<Inlay>, sqlx::Error> {
        let query = format!(
            "UPDATE inlays SET
                approved_proof_id = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inlay>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(proof_id)
            .fetch_optional(exec)
            .await
    }

    /// Conditionally toggle the inlay's order exclusion.
    pub async fn set_exclusion(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        excluded: bool,
    ) -> Result<Option<Inlay>, sqlx::Error> {
        let query = format!(
            "UPDATE inlays SET
                excluded_from_order = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inlay>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(excluded)
            .fetch_optional(exec)
            .await
    }
}
