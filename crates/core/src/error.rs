use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Concurrent update detected for {entity} with id {id}")]
    Conflict { entity: &'static str, id: DbId },

    #[error("Internal error: {0}")]
    Internal(String),
}
