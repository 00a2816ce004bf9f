//! Handlers for workflow notifications.
//!
//! Dealership actors see the `dealership` audience, internal actors the
//! `internal` audience. Delivery beyond these rows is external.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vitrail_core::actor::ActorKind;
use vitrail_core::types::DbId;
use vitrail_db::models::notification::{AUDIENCE_DEALERSHIP, AUDIENCE_INTERNAL};
use vitrail_db::repositories::NotificationRepo;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthActor;
use crate::query::Pagination;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificationFilter {
    #[serde(default)]
    pub unread: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl NotificationFilter {
    fn page(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn audience_for(auth: &AuthActor) -> &'static str {
    match auth.actor().kind {
        ActorKind::Dealership { .. } => AUDIENCE_DEALERSHIP,
        ActorKind::Internal => AUDIENCE_INTERNAL,
    }
}

/// GET /api/v1/notifications?unread=true
pub async fn list_notifications(
    auth: AuthActor,
    State(state): State<AppState>,
    Query(filter): Query<NotificationFilter>,
) -> AppResult<impl IntoResponse> {
    let notifications = NotificationRepo::list(
        &state.pool,
        audience_for(&auth),
        filter.unread,
        filter.page().limit(),
        filter.page().offset(),
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthActor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(&state.pool, audience_for(&auth)).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "count": count }),
    }))
}

/// POST /api/v1/notifications/{notification_id}/read
pub async fn mark_read(
    _auth: AuthActor,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_read(&state.pool, notification_id).await?;
    if !updated {
        return Err(not_found("Notification", notification_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
