//! Project status persistence for the approval aggregator and the decline
//! regression.
//!
//! These writes are coordinator-issued: the caller never read the project
//! row, so a stale version here is not the caller's lost update. A
//! conflicted write is therefore re-read and retried a bounded number of
//! times (a sibling approval may have just moved the project) instead of
//! being surfaced immediately.

use sqlx::{Postgres, Transaction};
use vitrail_core::approval;
use vitrail_core::project_status::ProjectStatus;
use vitrail_core::types::DbId;

use crate::error::{step, WorkflowError};
use crate::models::project::Project;
use crate::occ;
use crate::repositories::{InlayRepo, ProjectRepo};

use super::MAX_OCC_RETRIES;

/// Re-scan the project's inlays and persist the status the aggregate
/// dictates. Returns the project row as of this transaction (updated or
/// untouched).
pub(super) async fn persist_aggregate(
    tx: &mut Transaction<'_, Postgres>,
    project_id: DbId,
) -> Result<Project, WorkflowError> {
    for _ in 0..MAX_OCC_RETRIES {
        let project: Project = occ::get(&mut **tx, project_id).await?;
        let current = ProjectStatus::parse(&project.status)?;

        // Post-order statuses are not driven by the aggregate.
        if !current.driven_by_aggregation() {
            return Ok(project);
        }

        let states = InlayRepo::approval_states(&mut **tx, project_id)
            .await
            .map_err(step("scan sibling inlays"))?;
        let fully = approval::fully_approved(&states);
        let target = approval::aggregated_status(current, &states);

        if target.is_none() && project.approved == fully {
            return Ok(project);
        }
        let next = target.unwrap_or(current);

        match ProjectRepo::set_status(&mut **tx, project_id, project.version, next.as_str(), fully)
            .await
            .map_err(step("persist aggregated project status"))?
        {
            Some(updated) => {
                tracing::info!(
                    project_id,
                    from = %current,
                    to = %next,
                    fully_approved = fully,
                    "Aggregated project status"
                );
                return Ok(updated);
            }
            // Lost a race against a sibling transition; re-read and retry.
            None => continue,
        }
    }

    Err(WorkflowError::Conflict {
        entity: "Project",
        id: project_id,
    })
}

/// Move the project back to `designing` if it was pending approval or
/// approved. A decline always moves the project backward, never forward.
pub(super) async fn regress_on_decline(
    tx: &mut Transaction<'_, Postgres>,
    project_id: DbId,
) -> Result<Project, WorkflowError> {
    for _ in 0..MAX_OCC_RETRIES {
        let project: Project = occ::get(&mut **tx, project_id).await?;
        let current = ProjectStatus::parse(&project.status)?;

        if !current.regresses_on_decline() {
            return Ok(project);
        }

        match ProjectRepo::set_status(
            &mut **tx,
            project_id,
            project.version,
            ProjectStatus::Designing.as_str(),
            false,
        )
        .await
        .map_err(step("regress project status"))?
        {
            Some(updated) => {
                tracing::info!(
                    project_id,
                    from = %current,
                    "Project regressed to designing after decline"
                );
                return Ok(updated);
            }
            None => continue,
        }
    }

    Err(WorkflowError::Conflict {
        entity: "Project",
        id: project_id,
    })
}
