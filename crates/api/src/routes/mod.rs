pub mod health;
pub mod inlay;
pub mod invoice;
pub mod notification;
pub mod project;
pub mod proof;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                 create, list
/// /projects/{id}                            get, delete (internal only)
/// /projects/{id}/status                     aggregated status (GET), transition (PUT)
/// /projects/{id}/inlays                     create, list
/// /projects/{id}/invoices                   draft (POST), list
///
/// /inlays/{id}                              get
/// /inlays/{id}/exclusion                    toggle order exclusion (PUT)
/// /inlays/{id}/proofs                       create proof (POST), history (GET)
/// /inlays/{id}/chat                         post message, list
/// /inlays/{id}/milestones                   append event, list
/// /inlays/{id}/blockers                     raise, list (?unresolved=true)
///
/// /proofs/{id}                              get
/// /proofs/{id}/approve                      approve (POST)
/// /proofs/{id}/decline                      decline (POST)
///
/// /milestones/{id}/notes                    correct notes (PUT)
/// /blockers/{id}/resolve                    resolve (POST)
///
/// /invoices/{id}                            get
/// /invoices/{id}/line-items                 add (POST), list
/// /invoices/{id}/send | /pay | /void        lifecycle transitions (POST)
///
/// /notifications                            list (?unread=true)
/// /notifications/unread-count               count
/// /notifications/{id}/read                  mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/inlays", inlay::router())
        .nest("/proofs", proof::router())
        .nest("/milestones", inlay::milestone_router())
        .nest("/blockers", inlay::blocker_router())
        .nest("/invoices", invoice::router())
        .nest("/notifications", notification::router())
}
