//! Handlers for the invoice lifecycle, independent of the proof workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use vitrail_core::invoice::InvoiceStatus;
use vitrail_core::project_status::ProjectStatus;
use vitrail_core::types::DbId;
use vitrail_db::error::WorkflowError;
use vitrail_db::models::invoice::{AddLineItemRequest, Invoice, TransitionInvoiceRequest};
use vitrail_db::occ;
use vitrail_db::repositories::InvoiceRepo;

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::{load_project_scoped, require_internal};
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/invoices
///
/// Generate a draft invoice. Allowed once the project is order-ready
/// (`approved` or later, before `invoiced`).
pub async fn create_invoice(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "create invoices")?;

    let project = load_project_scoped(&state.pool, project_id, auth.actor()).await?;
    let status = ProjectStatus::parse(&project.status)?;
    if !status.order_ready() {
        return Err(AppError::Workflow(WorkflowError::InvalidState(format!(
            "project is {}; invoices can only be drafted for an order-ready project",
            project.status
        ))));
    }

    let invoice = InvoiceRepo::create_draft(&state.pool, project_id).await?;

    tracing::info!(
        project_id,
        invoice_id = invoice.id,
        invoice_number = %invoice.invoice_number,
        actor_id = auth.actor().user_id,
        "Invoice drafted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: invoice })))
}

/// GET /api/v1/projects/{project_id}/invoices
pub async fn list_invoices(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_project_scoped(&state.pool, project_id, auth.actor()).await?;
    let invoices = InvoiceRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: invoices }))
}

/// GET /api/v1/invoices/{invoice_id}
pub async fn get_invoice(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let invoice = load_invoice_scoped(&state, invoice_id, &auth).await?;
    Ok(Json(DataResponse { data: invoice }))
}

/// GET /api/v1/invoices/{invoice_id}/line-items
pub async fn list_line_items(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_invoice_scoped(&state, invoice_id, &auth).await?;
    let items = InvoiceRepo::list_line_items(&state.pool, invoice_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/invoices/{invoice_id}/line-items
///
/// Add a line item and recompute the invoice total in one transaction.
/// Conditional on the caller's `invoice_version` and on draft status.
pub async fn add_line_item(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
    Json(input): Json<AddLineItemRequest>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "edit invoices")?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let invoice = load_invoice_scoped(&state, invoice_id, &auth).await?;
    let status = InvoiceStatus::parse(&invoice.status)?;
    if !status.line_items_mutable() {
        return Err(AppError::Workflow(WorkflowError::InvalidState(format!(
            "invoice is {}; line items are only mutable while draft",
            invoice.status
        ))));
    }

    let result = InvoiceRepo::add_line_item(&state.pool, invoice_id, &input).await?;
    let (invoice, item) = result.ok_or(WorkflowError::Conflict {
        entity: "Invoice",
        id: invoice_id,
    })?;

    tracing::info!(
        invoice_id,
        line_item_id = item.id,
        total_cents = invoice.total_cents,
        actor_id = auth.actor().user_id,
        "Line item added"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: serde_json::json!({ "invoice": invoice, "line_item": item }),
        }),
    ))
}

/// POST /api/v1/invoices/{invoice_id}/send
pub async fn send_invoice(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
    Json(input): Json<TransitionInvoiceRequest>,
) -> AppResult<impl IntoResponse> {
    transition(state, auth, invoice_id, input, InvoiceStatus::Sent).await
}

/// POST /api/v1/invoices/{invoice_id}/pay
pub async fn pay_invoice(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
    Json(input): Json<TransitionInvoiceRequest>,
) -> AppResult<impl IntoResponse> {
    transition(state, auth, invoice_id, input, InvoiceStatus::Paid).await
}

/// POST /api/v1/invoices/{invoice_id}/void
pub async fn void_invoice(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(invoice_id): Path<DbId>,
    Json(input): Json<TransitionInvoiceRequest>,
) -> AppResult<impl IntoResponse> {
    transition(state, auth, invoice_id, input, InvoiceStatus::Void).await
}

/// Shared invoice status transition: state-machine check, then a
/// conditional write that also re-checks the source status.
async fn transition(
    state: AppState,
    auth: AuthActor,
    invoice_id: DbId,
    input: TransitionInvoiceRequest,
    target: InvoiceStatus,
) -> AppResult<Json<DataResponse<Invoice>>> {
    require_internal(auth.actor(), "manage invoices")?;

    let invoice = load_invoice_scoped(&state, invoice_id, &auth).await?;
    let current = InvoiceStatus::parse(&invoice.status)?;
    if !current.can_transition_to(target) {
        return Err(AppError::Workflow(WorkflowError::InvalidState(format!(
            "invoice cannot move from '{current}' to '{target}'"
        ))));
    }

    let updated = match target {
        InvoiceStatus::Sent => {
            InvoiceRepo::mark_sent(&state.pool, invoice_id, input.invoice_version).await?
        }
        InvoiceStatus::Paid => {
            InvoiceRepo::mark_paid(&state.pool, invoice_id, input.invoice_version).await?
        }
        InvoiceStatus::Void => {
            InvoiceRepo::mark_void(&state.pool, invoice_id, input.invoice_version).await?
        }
        InvoiceStatus::Draft => {
            return Err(AppError::Workflow(WorkflowError::InvalidState(
                "an invoice cannot return to draft".into(),
            )))
        }
    };
    let invoice = occ::require_matched(updated, invoice_id)?;

    tracing::info!(
        invoice_id,
        status = %invoice.status,
        actor_id = auth.actor().user_id,
        "Invoice status transitioned"
    );

    Ok(Json(DataResponse { data: invoice }))
}

/// Load an invoice and enforce project scoping through its project.
async fn load_invoice_scoped(
    state: &AppState,
    invoice_id: DbId,
    auth: &AuthActor,
) -> Result<Invoice, AppError> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, invoice_id)
        .await?
        .ok_or_else(|| not_found("Invoice", invoice_id))?;
    load_project_scoped(&state.pool, invoice.project_id, auth.actor()).await?;
    Ok(invoice)
}
