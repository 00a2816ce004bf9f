//! Route definitions for inlays and their production logs.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{blocker, chat, inlay, milestone, proof};
use crate::state::AppState;

/// Inlay routes, nested under `/inlays`.
///
/// ```text
/// GET    /{inlay_id}                get_inlay
/// PUT    /{inlay_id}/exclusion      set_exclusion
/// POST   /{inlay_id}/proofs         create_proof
/// GET    /{inlay_id}/proofs         list_proofs
/// POST   /{inlay_id}/chat           post_message
/// GET    /{inlay_id}/chat           list_messages
/// POST   /{inlay_id}/milestones     append_milestone (internal only)
/// GET    /{inlay_id}/milestones     list_milestones
/// POST   /{inlay_id}/blockers       create_blocker (internal only)
/// GET    /{inlay_id}/blockers       list_blockers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{inlay_id}", get(inlay::get_inlay))
        .route("/{inlay_id}/exclusion", put(inlay::set_exclusion))
        .route(
            "/{inlay_id}/proofs",
            post(proof::create_proof).get(proof::list_proofs),
        )
        .route(
            "/{inlay_id}/chat",
            post(chat::post_message).get(chat::list_messages),
        )
        .route(
            "/{inlay_id}/milestones",
            post(milestone::append_milestone).get(milestone::list_milestones),
        )
        .route(
            "/{inlay_id}/blockers",
            post(blocker::create_blocker).get(blocker::list_blockers),
        )
}

/// Milestone correction route, nested under `/milestones`.
///
/// ```text
/// PUT    /{milestone_id}/notes      correct_notes (internal only)
/// ```
pub fn milestone_router() -> Router<AppState> {
    Router::new().route("/{milestone_id}/notes", put(milestone::correct_notes))
}

/// Blocker resolution route, nested under `/blockers`.
///
/// ```text
/// POST   /{blocker_id}/resolve      resolve_blocker (internal only)
/// ```
pub fn blocker_router() -> Router<AppState> {
    Router::new().route("/{blocker_id}/resolve", post(blocker::resolve_blocker))
}
