//! Error taxonomy for the workflow layer.
//!
//! Every failure a workflow entry point can produce maps to one of these
//! kinds; the HTTP layer translates them to status codes without further
//! inspection. `Transaction` wraps an underlying store failure with the step
//! that failed, for operator diagnosis; the whole transaction has already
//! been rolled back by the time it is returned.

use vitrail_core::error::CoreError;
use vitrail_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Optimistic-concurrency conflict: the row was updated (or deleted)
    /// since the caller read it. Never auto-retried for caller-supplied
    /// versions; the caller must re-fetch and resubmit.
    #[error("Concurrent update detected for {entity} with id {id}")]
    Conflict { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Workflow step '{step}' failed")]
    Transaction {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Workflow timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl From<CoreError> for WorkflowError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => WorkflowError::NotFound { entity, id },
            CoreError::Validation(msg) => WorkflowError::Validation(msg),
            CoreError::InvalidState(msg) => WorkflowError::InvalidState(msg),
            CoreError::Conflict { entity, id } => WorkflowError::Conflict { entity, id },
            CoreError::Internal(msg) => WorkflowError::Transaction {
                step: "domain",
                source: sqlx::Error::Protocol(msg),
            },
        }
    }
}

/// Label a store failure with the workflow step it occurred in.
///
/// ```ignore
/// ChatRepo::create(&mut *tx, &entry).await.map_err(step("insert proof chat entry"))?;
/// ```
pub fn step(step: &'static str) -> impl FnOnce(sqlx::Error) -> WorkflowError {
    move |source| WorkflowError::Transaction { step, source }
}
