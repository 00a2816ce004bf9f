//! HTTP handlers, one module per resource area.

pub mod blocker;
pub mod chat;
pub mod inlay;
pub mod invoice;
pub mod milestone;
pub mod notification;
pub mod project;
pub mod proof;

use vitrail_core::actor::{Actor, ActorKind};
use vitrail_core::types::DbId;
use vitrail_db::models::inlay::Inlay;
use vitrail_db::models::project::Project;
use vitrail_db::repositories::{InlayRepo, ProjectRepo};
use vitrail_db::workflow::ensure_project_access;
use vitrail_db::DbPool;

use crate::error::{not_found, AppError};

/// Load an inlay and its owning project, enforcing dealership scoping.
pub(crate) async fn load_inlay_scoped(
    pool: &DbPool,
    inlay_id: DbId,
    actor: &Actor,
) -> Result<(Inlay, Project), AppError> {
    let inlay = InlayRepo::find_by_id(pool, inlay_id)
        .await?
        .ok_or_else(|| not_found("Inlay", inlay_id))?;
    let project = ProjectRepo::find_by_id(pool, inlay.project_id)
        .await?
        .ok_or_else(|| not_found("Project", inlay.project_id))?;
    ensure_project_access(actor, &project)?;
    Ok((inlay, project))
}

/// Load a project, enforcing dealership scoping.
pub(crate) async fn load_project_scoped(
    pool: &DbPool,
    project_id: DbId,
    actor: &Actor,
) -> Result<Project, AppError> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| not_found("Project", project_id))?;
    ensure_project_access(actor, &project)?;
    Ok(project)
}

/// Reject dealership actors from internal-only operations.
pub(crate) fn require_internal(actor: &Actor, action: &str) -> Result<(), AppError> {
    match actor.kind {
        ActorKind::Internal => Ok(()),
        ActorKind::Dealership { .. } => Err(AppError::Forbidden(format!(
            "Only internal users may {action}"
        ))),
    }
}
