//! Handlers for inlay CRUD and order-exclusion toggling.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vitrail_core::project_status::ProjectStatus;
use vitrail_core::types::DbId;
use vitrail_db::error::WorkflowError;
use vitrail_db::models::inlay::{CreateInlayRequest, SetExclusionRequest, VALID_INLAY_TYPES};
use vitrail_db::occ;
use vitrail_db::repositories::InlayRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_inlay_scoped, load_project_scoped};
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/inlays
///
/// Add an inlay to a project. Scope is frozen once the order is placed.
pub async fn create_inlay(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateInlayRequest>,
) -> AppResult<impl IntoResponse> {
    if !VALID_INLAY_TYPES.contains(&input.inlay_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Invalid inlay type '{}'. Must be one of: {}",
            input.inlay_type,
            VALID_INLAY_TYPES.join(", ")
        )));
    }
    if input.label.trim().is_empty() {
        return Err(AppError::BadRequest("label must not be empty".into()));
    }

    let project = load_project_scoped(&state.pool, project_id, auth.actor()).await?;
    let status = ProjectStatus::parse(&project.status)?;
    if !status.accepts_new_inlays() {
        return Err(AppError::Workflow(WorkflowError::InvalidState(format!(
            "project is {}; inlays can no longer be added",
            project.status
        ))));
    }

    let inlay = InlayRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(
        inlay_id = inlay.id,
        project_id,
        inlay_type = %inlay.inlay_type,
        actor_id = auth.actor().user_id,
        "Inlay created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: inlay })))
}

/// GET /api/v1/projects/{project_id}/inlays
pub async fn list_inlays(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_project_scoped(&state.pool, project_id, auth.actor()).await?;
    let inlays = InlayRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: inlays }))
}

/// GET /api/v1/inlays/{inlay_id}
pub async fn get_inlay(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (inlay, _project) = load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;
    Ok(Json(DataResponse { data: inlay }))
}

/// PUT /api/v1/inlays/{inlay_id}/exclusion
///
/// Toggle whether the inlay counts toward the order. Conditional on the
/// caller's `inlay_version`; excluded inlays are ignored by the approval
/// aggregator.
pub async fn set_exclusion(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Json(input): Json<SetExclusionRequest>,
) -> AppResult<impl IntoResponse> {
    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;

    let updated = InlayRepo::set_exclusion(
        &state.pool,
        inlay_id,
        input.inlay_version,
        input.excluded_from_order,
    )
    .await?;
    let inlay = occ::require_matched(updated, inlay_id)?;

    tracing::info!(
        inlay_id,
        excluded = inlay.excluded_from_order,
        actor_id = auth.actor().user_id,
        "Inlay exclusion updated"
    );

    Ok(Json(DataResponse { data: inlay }))
}
