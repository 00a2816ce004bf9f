//! The versioned entity store contract.
//!
//! Every mutable workflow entity carries a monotonically increasing
//! `version` counter, starting at 1 on insert. An update is a single
//! conditional write:
//!
//! ```sql
//! UPDATE <table>
//!    SET <fields>, version = version + 1, updated_at = NOW()
//!  WHERE id = $1 AND version = $2
//!  RETURNING <columns>
//! ```
//!
//! Zero rows matched means the row is gone or the caller's version is stale;
//! either way the write has changed nothing and the caller gets a
//! [`WorkflowError::Conflict`]. Conflicts are never silently merged.
//!
//! Repositories keep their per-table SQL (field lists differ), but the
//! lookup helpers and the conflict classification live here once.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;
use vitrail_core::types::DbId;

use crate::error::{step, WorkflowError};

/// A row type backed by a versioned table.
pub trait VersionedRecord: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Human-readable entity name used in errors ("Project", "InlayProof").
    const ENTITY: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;
}

/// Find a record by internal id.
pub async fn find_by_id<E: VersionedRecord>(
    exec: impl PgExecutor<'_>,
    id: DbId,
) -> Result<Option<E>, sqlx::Error> {
    let query = format!("SELECT {} FROM {} WHERE id = $1", E::COLUMNS, E::TABLE);
    sqlx::query_as::<_, E>(&query)
        .bind(id)
        .fetch_optional(exec)
        .await
}

/// Find a record by external uuid.
pub async fn find_by_uuid<E: VersionedRecord>(
    exec: impl PgExecutor<'_>,
    uuid: Uuid,
) -> Result<Option<E>, sqlx::Error> {
    let query = format!("SELECT {} FROM {} WHERE uuid = $1", E::COLUMNS, E::TABLE);
    sqlx::query_as::<_, E>(&query)
        .bind(uuid)
        .fetch_optional(exec)
        .await
}

/// Find a record by id, or fail with `NotFound`.
pub async fn get<E: VersionedRecord>(
    exec: impl PgExecutor<'_>,
    id: DbId,
) -> Result<E, WorkflowError> {
    find_by_id::<E>(exec, id)
        .await
        .map_err(step("load entity"))?
        .ok_or(WorkflowError::NotFound {
            entity: E::ENTITY,
            id,
        })
}

/// Classify the outcome of a conditional `(id, version)` write.
///
/// `None` (zero rows matched) is a conflict: the id is gone or the version
/// is stale. The distinction is deliberately not surfaced — a caller holding
/// a stale handle must re-read either way.
pub fn require_matched<E: VersionedRecord>(
    row: Option<E>,
    id: DbId,
) -> Result<E, WorkflowError> {
    row.ok_or(WorkflowError::Conflict {
        entity: E::ENTITY,
        id,
    })
}
