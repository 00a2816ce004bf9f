//! Repository for the `invoices` and `invoice_line_items` tables.

use sqlx::{PgExecutor, PgPool};
use vitrail_core::invoice::InvoiceStatus;
use vitrail_core::types::DbId;

use crate::models::invoice::{AddLineItemRequest, Invoice, InvoiceLineItem};
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, project_id, invoice_number, status, total_cents, \
                       issued_at, paid_at, voided_at, created_at, updated_at";

const LINE_ITEM_COLUMNS: &str = "id, uuid, version, invoice_id, inlay_id, description, \
                                 quantity, unit_price_cents, created_at, updated_at";

impl VersionedRecord for Invoice {
    const ENTITY: &'static str = "Invoice";
    const TABLE: &'static str = "invoices";
    const COLUMNS: &'static str = COLUMNS;
}

impl VersionedRecord for InvoiceLineItem {
    const ENTITY: &'static str = "InvoiceLineItem";
    const TABLE: &'static str = "invoice_line_items";
    const COLUMNS: &'static str = LINE_ITEM_COLUMNS;
}

/// Provides lifecycle operations for invoices and their line items.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Create a draft invoice for a project with a generated invoice number.
    pub async fn create_draft(
        exec: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (project_id, invoice_number)
             VALUES ($1, 'INV-' || to_char(nextval('invoice_number_seq'), 'FM000000'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_one(exec)
            .await
    }

    /// Find an invoice by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        occ::find_by_id::<Invoice>(exec, id).await
    }

    /// List a project's invoices, most recently created first.
    pub async fn list_for_project(
        exec: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(exec)
            .await
    }

    /// List an invoice's line items in creation order.
    pub async fn list_line_items(
        exec: impl PgExecutor<'_>,
        invoice_id: DbId,
    ) -> Result<Vec<InvoiceLineItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_ITEM_COLUMNS} FROM invoice_line_items
             WHERE invoice_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, InvoiceLineItem>(&query)
            .bind(invoice_id)
            .fetch_all(exec)
            .await
    }

    /// Add a line item to a draft invoice and recompute the denormalized
    /// total, in one transaction.
    ///
    /// The invoice write is conditional on `(id, version)` and draft status;
    /// `Ok(None)` means the caller's version is stale, the invoice is gone,
    /// or it is no longer a draft — nothing was written.
    pub async fn add_line_item(
        pool: &PgPool,
        invoice_id: DbId,
        input: &AddLineItemRequest,
    ) -> Result<Option<(Invoice, InvoiceLineItem)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let item_query = format!(
            "INSERT INTO invoice_line_items
                (invoice_id, inlay_id, description, quantity, unit_price_cents)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LINE_ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, InvoiceLineItem>(&item_query)
            .bind(invoice_id)
            .bind(input.inlay_id)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(input.unit_price_cents)
            .fetch_one(&mut *tx)
            .await?;

        let invoice_query = format!(
            "UPDATE invoices SET
                total_cents = (
                    SELECT COALESCE(SUM(quantity::bigint * unit_price_cents), 0)
                    FROM invoice_line_items WHERE invoice_id = $1
                ),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        let invoice = sqlx::query_as::<_, Invoice>(&invoice_query)
            .bind(invoice_id)
            .bind(input.invoice_version)
            .fetch_optional(&mut *tx)
            .await?;

        match invoice {
            Some(invoice) => {
                tx.commit().await?;
                Ok(Some((invoice, item)))
            }
            // Dropping the transaction rolls the line item back.
            None => Ok(None),
        }
    }

    /// Conditionally mark a draft invoice as sent, stamping `issued_at`.
    pub async fn mark_sent(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                status = $3,
                issued_at = NOW(),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(InvoiceStatus::Sent.as_str())
            .fetch_optional(exec)
            .await
    }

    /// Conditionally mark a sent invoice as paid.
    pub async fn mark_paid(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                status = $3,
                paid_at = NOW(),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND status = 'sent'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(InvoiceStatus::Paid.as_str())
            .fetch_optional(exec)
            .await
    }

    /// Conditionally void a draft or sent invoice.
    pub async fn mark_void(
        exec: impl PgExecutor<'_>,
        id: DbId,
        expected_version: i32,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                status = $3,
                voided_at = NOW(),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2 AND status IN ('draft', 'sent')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(InvoiceStatus::Void.as_str())
            .fetch_optional(exec)
            .await
    }
}
