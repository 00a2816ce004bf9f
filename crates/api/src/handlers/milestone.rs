//! Handlers for the manufacturing milestone log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vitrail_core::milestone::{validate_event_type, validate_step};
use vitrail_core::types::DbId;
use vitrail_db::models::milestone::{AppendMilestoneRequest, CorrectNotesRequest};
use vitrail_db::occ;
use vitrail_db::repositories::{BlockerRepo, MilestoneRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::{load_inlay_scoped, require_internal};
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/inlays/{inlay_id}/milestones
///
/// Append a production-step event. Advancement is always a new row.
/// Blockers are advisory: an open hard blocker does not prevent the append,
/// but the skew is logged for operators.
pub async fn append_milestone(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Json(input): Json<AppendMilestoneRequest>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "record milestones")?;
    validate_step(&input.step).map_err(AppError::BadRequest)?;
    validate_event_type(&input.event_type).map_err(AppError::BadRequest)?;

    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;

    if BlockerRepo::has_open_hard_blocker(&state.pool, inlay_id).await? {
        tracing::warn!(
            inlay_id,
            step = %input.step,
            "Milestone recorded while a hard blocker is open"
        );
    }

    let milestone = MilestoneRepo::append(
        &state.pool,
        inlay_id,
        &input.step,
        &input.event_type,
        auth.actor().user_id,
        input.notes.as_deref(),
        input.event_time,
    )
    .await?;

    tracing::info!(
        inlay_id,
        milestone_id = milestone.id,
        step = %milestone.step,
        event_type = %milestone.event_type,
        actor_id = auth.actor().user_id,
        "Milestone recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: milestone })))
}

/// GET /api/v1/inlays/{inlay_id}/milestones
pub async fn list_milestones(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;
    let milestones = MilestoneRepo::list_for_inlay(&state.pool, inlay_id).await?;
    Ok(Json(DataResponse { data: milestones }))
}

/// PUT /api/v1/milestones/{milestone_id}/notes
///
/// Correct a milestone's notes. Typo fixes only — step and event type are
/// immutable; advancement is always a new row.
pub async fn correct_notes(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(milestone_id): Path<DbId>,
    Json(input): Json<CorrectNotesRequest>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "correct milestone notes")?;

    let milestone = MilestoneRepo::find_by_id(&state.pool, milestone_id)
        .await?
        .ok_or_else(|| not_found("InlayMilestone", milestone_id))?;
    load_inlay_scoped(&state.pool, milestone.inlay_id, auth.actor()).await?;

    let updated = MilestoneRepo::correct_notes(
        &state.pool,
        milestone_id,
        input.milestone_version,
        &input.notes,
    )
    .await?;
    let milestone = occ::require_matched(updated, milestone_id)?;

    Ok(Json(DataResponse { data: milestone }))
}
