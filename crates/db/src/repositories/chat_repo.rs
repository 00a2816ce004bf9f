//! Repository for the `inlay_chats` table.

use sqlx::PgExecutor;
use vitrail_core::types::DbId;

use crate::models::chat::{InlayChat, NewChatEntry};
use crate::occ::{self, VersionedRecord};

const COLUMNS: &str = "id, uuid, version, inlay_id, message_type, body, image_url, \
                       dealership_user_id, internal_user_id, created_at, updated_at";

impl VersionedRecord for InlayChat {
    const ENTITY: &'static str = "InlayChat";
    const TABLE: &'static str = "inlay_chats";
    const COLUMNS: &'static str = COLUMNS;
}

/// Provides append and read operations for the inlay chat log.
pub struct ChatRepo;

impl ChatRepo {
    /// Append a chat entry, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        entry: &NewChatEntry,
    ) -> Result<InlayChat, sqlx::Error> {
        let (dealership_user_id, internal_user_id) = entry.sender.into_columns();
        let query = format!(
            "INSERT INTO inlay_chats
                (inlay_id, message_type, body, image_url, dealership_user_id, internal_user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InlayChat>(&query)
            .bind(entry.inlay_id)
            .bind(entry.message_type)
            .bind(&entry.body)
            .bind(&entry.image_url)
            .bind(dealership_user_id)
            .bind(internal_user_id)
            .fetch_one(exec)
            .await
    }

    /// Find a chat entry by its internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<InlayChat>, sqlx::Error> {
        occ::find_by_id::<InlayChat>(exec, id).await
    }

    /// List an inlay's chat entries, oldest first.
    pub async fn list_for_inlay(
        exec: impl PgExecutor<'_>,
        inlay_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InlayChat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inlay_chats
             WHERE inlay_id = $1
             ORDER BY created_at, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, InlayChat>(&query)
            .bind(inlay_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(exec)
            .await
    }
}
