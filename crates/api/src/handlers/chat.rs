//! Handlers for the inlay chat log.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vitrail_core::chat::{validate_user_message_type, MESSAGE_TYPE_IMAGE, MESSAGE_TYPE_TEXT};
use vitrail_core::types::DbId;
use vitrail_db::models::chat::{NewChatEntry, PostMessageRequest};
use vitrail_db::repositories::ChatRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_inlay_scoped;
use crate::middleware::auth::AuthActor;
use crate::query::Pagination;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/inlays/{inlay_id}/chat
///
/// The inlay's chat log, oldest first.
pub async fn list_messages(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Query(page): Query<Pagination>,
) -> AppResult<impl IntoResponse> {
    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;
    let messages =
        ChatRepo::list_for_inlay(&state.pool, inlay_id, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/inlays/{inlay_id}/chat
///
/// Post a free-form `text` or `image` message. The `proof_*` entries are
/// workflow-generated and cannot be posted directly.
pub async fn post_message(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Json(input): Json<PostMessageRequest>,
) -> AppResult<impl IntoResponse> {
    validate_user_message_type(&input.message_type).map_err(AppError::BadRequest)?;
    let has_body = input.body.as_deref().is_some_and(|b| !b.trim().is_empty());
    let has_image = input.image_url.as_deref().is_some_and(|u| !u.is_empty());
    if !has_body && !has_image {
        return Err(AppError::BadRequest(
            "a message needs a body or an image_url".into(),
        ));
    }

    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;

    // Re-borrow the validated type as the static constant so NewChatEntry
    // stays uniform with workflow-side entries.
    let message_type = if input.message_type == MESSAGE_TYPE_TEXT {
        MESSAGE_TYPE_TEXT
    } else {
        MESSAGE_TYPE_IMAGE
    };

    let entry = ChatRepo::create(
        &state.pool,
        &NewChatEntry {
            inlay_id,
            message_type,
            body: input.body,
            image_url: input.image_url,
            sender: auth.actor().sender(),
        },
    )
    .await?;

    tracing::info!(
        inlay_id,
        chat_id = entry.id,
        message_type,
        actor_id = auth.actor().user_id,
        "Chat message posted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}
