//! Invoice and line item entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;
use vitrail_core::types::{DbId, Timestamp};

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub project_id: DbId,
    pub invoice_number: String,
    pub status: String,
    /// Denormalized sum of line items, maintained in the same transaction
    /// as every line-item write.
    pub total_cents: i64,
    pub issued_at: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub voided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `invoice_line_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceLineItem {
    pub id: DbId,
    pub uuid: Uuid,
    pub version: i32,
    pub invoice_id: DbId,
    pub inlay_id: Option<DbId>,
    pub description: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for adding a line item to a draft invoice.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddLineItemRequest {
    pub inlay_id: Option<DbId>,
    #[validate(length(min = 1, message = "a line item description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "unit_price_cents must not be negative"))]
    pub unit_price_cents: i64,
    pub invoice_version: i32,
}

/// Request body for an invoice status transition (`send`, `pay`, `void`).
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionInvoiceRequest {
    pub invoice_version: i32,
}
