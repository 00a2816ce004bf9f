//! Handlers for production blockers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use vitrail_core::blocker::validate_blocker_type;
use vitrail_core::types::DbId;
use vitrail_db::models::blocker::{CreateBlockerRequest, ResolveBlockerRequest};
use vitrail_db::occ;
use vitrail_db::repositories::BlockerRepo;

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::{load_inlay_scoped, require_internal};
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BlockerFilter {
    /// When `true`, only unresolved blockers are returned.
    #[serde(default)]
    pub unresolved: bool,
}

/// POST /api/v1/inlays/{inlay_id}/blockers
pub async fn create_blocker(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Json(input): Json<CreateBlockerRequest>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "raise blockers")?;
    validate_blocker_type(&input.blocker_type).map_err(AppError::BadRequest)?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;

    let blocker = BlockerRepo::create(
        &state.pool,
        inlay_id,
        &input.blocker_type,
        &input.description,
        auth.actor().user_id,
    )
    .await?;

    tracing::info!(
        inlay_id,
        blocker_id = blocker.id,
        blocker_type = %blocker.blocker_type,
        actor_id = auth.actor().user_id,
        "Blocker raised"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: blocker })))
}

/// GET /api/v1/inlays/{inlay_id}/blockers?unresolved=true
pub async fn list_blockers(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Query(filter): Query<BlockerFilter>,
) -> AppResult<impl IntoResponse> {
    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;
    let blockers = if filter.unresolved {
        BlockerRepo::list_unresolved(&state.pool, inlay_id).await?
    } else {
        BlockerRepo::list_for_inlay(&state.pool, inlay_id).await?
    };
    Ok(Json(DataResponse { data: blockers }))
}

/// POST /api/v1/blockers/{blocker_id}/resolve
///
/// Resolve an open blocker. Conditional on the caller's `blocker_version`
/// and on the blocker still being open, so a prior resolution is never
/// overwritten.
pub async fn resolve_blocker(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(blocker_id): Path<DbId>,
    Json(input): Json<ResolveBlockerRequest>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "resolve blockers")?;

    let blocker = BlockerRepo::find_by_id(&state.pool, blocker_id)
        .await?
        .ok_or_else(|| not_found("InlayBlocker", blocker_id))?;
    load_inlay_scoped(&state.pool, blocker.inlay_id, auth.actor()).await?;

    let updated = BlockerRepo::resolve(
        &state.pool,
        blocker_id,
        input.blocker_version,
        auth.actor().user_id,
        input.resolution_notes.as_deref(),
    )
    .await?;
    let blocker = occ::require_matched(updated, blocker_id)?;

    tracing::info!(
        blocker_id,
        inlay_id = blocker.inlay_id,
        actor_id = auth.actor().user_id,
        "Blocker resolved"
    );

    Ok(Json(DataResponse { data: blocker }))
}
