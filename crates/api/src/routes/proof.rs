//! Route definitions for the proof workflow entry points.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::proof;
use crate::state::AppState;

/// Proof routes, nested under `/proofs`.
///
/// ```text
/// GET    /{proof_id}                get_proof
/// POST   /{proof_id}/approve        approve_proof
/// POST   /{proof_id}/decline        decline_proof
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{proof_id}", get(proof::get_proof))
        .route("/{proof_id}/approve", post(proof::approve_proof))
        .route("/{proof_id}/decline", post(proof::decline_proof))
}
