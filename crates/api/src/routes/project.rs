//! Route definitions for projects and their nested resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{inlay, invoice, project};
use crate::state::AppState;

/// Project routes, nested under `/projects`.
///
/// ```text
/// POST   /                          create_project
/// GET    /                          list_projects
/// GET    /{project_id}              get_project
/// DELETE /{project_id}              delete_project (internal only)
/// GET    /{project_id}/status       get_project_status
/// PUT    /{project_id}/status       transition_project
/// POST   /{project_id}/inlays       create_inlay
/// GET    /{project_id}/inlays       list_inlays
/// POST   /{project_id}/invoices     create_invoice (internal only)
/// GET    /{project_id}/invoices     list_invoices
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(project::create_project).get(project::list_projects))
        .route(
            "/{project_id}",
            get(project::get_project).delete(project::delete_project),
        )
        .route(
            "/{project_id}/status",
            get(project::get_project_status).put(project::transition_project),
        )
        .route(
            "/{project_id}/inlays",
            post(inlay::create_inlay).get(inlay::list_inlays),
        )
        .route(
            "/{project_id}/invoices",
            post(invoice::create_invoice).get(invoice::list_invoices),
        )
}
