//! Route definitions for invoices.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::invoice;
use crate::state::AppState;

/// Invoice routes, nested under `/invoices`.
///
/// ```text
/// GET    /{invoice_id}              get_invoice
/// POST   /{invoice_id}/line-items   add_line_item (internal only)
/// GET    /{invoice_id}/line-items   list_line_items
/// POST   /{invoice_id}/send         send_invoice (internal only)
/// POST   /{invoice_id}/pay          pay_invoice (internal only)
/// POST   /{invoice_id}/void         void_invoice (internal only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{invoice_id}", get(invoice::get_invoice))
        .route(
            "/{invoice_id}/line-items",
            post(invoice::add_line_item).get(invoice::list_line_items),
        )
        .route("/{invoice_id}/send", post(invoice::send_invoice))
        .route("/{invoice_id}/pay", post(invoice::pay_invoice))
        .route("/{invoice_id}/void", post(invoice::void_invoice))
}
