//! Handlers for project CRUD, status transitions, and the aggregated
//! status view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vitrail_core::actor::ActorKind;
use vitrail_core::types::DbId;
use vitrail_db::models::project::{CreateProjectRequest, TransitionProjectRequest};
use vitrail_db::repositories::ProjectRepo;

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::{load_project_scoped, require_internal};
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
///
/// Create a project in `draft` status. Dealership actors create projects in
/// their own dealership; internal actors must name one.
pub async fn create_project(
    auth: AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let dealership_id = match auth.actor().kind {
        ActorKind::Dealership { dealership_id } => {
            if input.dealership_id.is_some_and(|id| id != dealership_id) {
                return Err(AppError::BadRequest(
                    "dealership actors create projects in their own dealership".into(),
                ));
            }
            dealership_id
        }
        ActorKind::Internal => input.dealership_id.ok_or_else(|| {
            AppError::BadRequest("dealership_id is required for internal actors".into())
        })?,
    };

    let project = ProjectRepo::create(&state.pool, dealership_id, input.name.trim()).await?;

    tracing::info!(
        project_id = project.id,
        dealership_id,
        actor_id = auth.actor().user_id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
///
/// Internal actors see all projects; dealership actors see their own.
pub async fn list_projects(
    auth: AuthActor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = match auth.actor().kind {
        ActorKind::Internal => ProjectRepo::list(&state.pool).await?,
        ActorKind::Dealership { dealership_id } => {
            ProjectRepo::list_for_dealership(&state.pool, dealership_id).await?
        }
    };
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{project_id}
pub async fn get_project(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project_scoped(&state.pool, project_id, auth.actor()).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects/{project_id}/status
///
/// The stored status plus the derived aggregation summary.
pub async fn get_project_status(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let summary = state
        .workflow
        .project_status_summary(project_id, auth.actor())
        .await?;
    Ok(Json(DataResponse { data: summary }))
}

/// PUT /api/v1/projects/{project_id}/status
///
/// Explicit status transition: submission (`draft` -> `designing`), order
/// placement, fulfilment progression, or administrative cancellation. The
/// write is conditional on the caller's `project_version`.
pub async fn transition_project(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<TransitionProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let project = state
        .workflow
        .transition_project(
            project_id,
            &input.status,
            input.project_version,
            auth.actor(),
        )
        .await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{project_id}
///
/// Administrative escape hatch — hard delete, internal users only. The
/// workflow itself never deletes projects.
pub async fn delete_project(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_internal(auth.actor(), "delete projects")?;

    let deleted = ProjectRepo::hard_delete(&state.pool, project_id).await?;
    if !deleted {
        return Err(not_found("Project", project_id));
    }

    tracing::info!(
        project_id,
        actor_id = auth.actor().user_id,
        "Project hard-deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
