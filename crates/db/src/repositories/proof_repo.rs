//! Repository for the `inlay_proofs` table.

use sqlx::PgExecutor;
use vitrail_core::proof::ProofStatus;
use vitrail_core::types::DbId;

use crate::models::proof::InlayProof;
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, inlay_id, version_number, status, design_asset_url, \
                       price_group_id, price_cents, sent_in_chat_id, approved_at, approved_by, \
                       declined_at, declined_by, decline_reason, created_at, updated_at";

impl VersionedRecord for InlayProof {
    const ENTITY: &'static str = "InlayProof";
    const TABLE: &'static str = "inlay_proofs";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides storage operations for design proofs.
pub struct ProofRepo;

impl ProofRepo {
    /// Insert a new pending proof, returning the created row.
    ///
    /// `version_number` must be `count(proofs of inlay) + 1`; the
    /// `uq_inlay_proofs_version_number` index rejects duplicates, and the
    /// `uq_inlay_proofs_single_pending` index rejects a second pending proof.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
        version_number: i32,
        design_asset_url: &str,
        price_group_id: Option<DbId>,
        price_cents: Option<i64>,
        sent_in_chat_id: DbId,
    ) -> Result<InlayProof, sqlx::Error> {
        let query = format!(
            "INSERT INTO inlay_proofs
                (inlay_id, version_number, design_asset_url, price_group_id, price_cents,
                 sent_in_chat_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayProof>(&query)
            .bind(inlay_id)
            .bind(version_number)
            .bind(design_asset_url)
            .bind(price_group_id)
            .bind(price_cents)
            .bind(sent_in_chat_id)
            .fetch_one(exec)
            .await
    }

    /// Find a proof by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<InlayProof>, sqlx::Error> {
        occ::find_by_id::<InlayProof>(exec, id).await
    }

    /// List an inlay's proofs in version order.
    pub async fn list_for_inlay(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<Vec<InlayProof>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM inlay_proofs WHERE inlay_id = $1 ORDER BY version_number");
        sqlx::query_as::<_, InlayProof>(&query)
            .bind(inlay_id)
            .fetch_all(exec)
            .await
    }

    /// The next dense version number for an inlay: proof count + 1.
    /// Superseded and declined proofs still count — version numbers are
    /// dense over the full history.
    pub async fn next_version_number(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        let next: (i32,) =
            sqlx::query_as("SELECT COUNT(*)::int + 1 FROM inlay_proofs WHERE inlay_id = $1")
                .bind(inlay_id)
                .fetch_one(exec)
                .await?;
        Ok(next.0)
    }

    /// Move every pending proof of an inlay to `superseded`, bumping each
    /// row's version. Returns the number of proofs superseded.
    pub async fn supersede_pending(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE inlay_proofs SET
                status = 'superseded',
                version = version + 1,
                updated_at = NOW()
             WHERE inlay_id = $1 AND status = 'pending'",
        )
        .bind(inlay_id)
        .execute(exec)
        .await?;
        Ok(result.rows_affected())
    }

    /// Conditionally approve a pending proof.
    ///
    /// The single conditional write matches on `(id, version)` *and*
    /// `status = 'pending'`, so two racers at the same version resolve as
    /// exactly one winner and a non-pending proof never transitions.
    pub async fn approve(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        approved_by: DbId,
    ) -> Result<Option<InlayProof>, sqlx::Error> {
        let query = format!(
            "UPDATE inlay_proofs SET
                status = $4,
                approved_at = NOW(),
                approved_by = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayProof>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(approved_by)
            .bind(ProofStatus::Approved.as_str())
            .fetch_optional(exec)
            .await
    }

    /// Conditionally decline a pending proof with a reason.
    pub async fn decline(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
        declined_by: DbId,
        reason: &str,
    ) -> Result<Option<InlayProof>, sqlx::Error> {
        let query = format!(
            "UPDATE inlay_proofs SET
                status = $5,
                declined_at = NOW(),
                declined_by = $3,
                decline_reason = $4,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayProof>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(declined_by)
            .bind(reason)
            .bind(ProofStatus::Declined.as_str())
            .fetch_optional(exec)
            .await
    }
}
