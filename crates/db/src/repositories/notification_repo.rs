//! Repository for the `notifications` table.

use sqlx::PgExecutor;
use vitrail_core::types::DbId;

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, project_id, inlay_id, event_type, audience, body, is_read, read_at, created_at";

/// Provides write and read operations for workflow notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Emit a notification, returning the generated ID.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &NewNotification,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (project_id, inlay_id, event_type, audience, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.project_id)
        .bind(input.inlay_id)
        .bind(input.event_type)
        .bind(input.audience)
        .bind(&input.body)
        .fetch_one(exec)
        .await
    }

    /// List notifications for an audience, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with
    /// `is_read = false` are returned.
    pub async fn list(
        exec: impl PgExecutor<'_>,
        audience: &str,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE audience = $1 {filter}
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(audience)
            .bind(limit)
            .bind(offset)
            .fetch_all(exec)
            .await
    }

    /// Mark a single notification as read. Returns `true` if a row was
    /// updated.
    pub async fn mark_read(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true, read_at = NOW()
             WHERE id = $1 AND is_read = false",
        )
        .bind(id)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of unread notifications for an audience.
    pub async fn unread_count(
        exec: impl PgExecutor<'_>,
        audience: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE audience = $1 AND is_read = false",
        )
        .bind(audience)
        .fetch_one(exec)
        .await
    }
}
