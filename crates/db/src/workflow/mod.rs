//! Transactional workflow coordinator.
//!
//! Each entry point sequences the multi-row writes of one workflow action
//! inside a single database transaction: either every write lands or none
//! do. sqlx transactions roll back on drop, so any `?` on the way out of a
//! routine discards all prior writes; `commit()` is the only path that
//! publishes them.
//!
//! Every entry point runs under a bounded execution budget. Exceeding it
//! aborts the transaction (rollback on drop) and reports a timeout with no
//! partial effect.

mod aggregate;
mod proofs;

use std::time::Duration;

use serde::Serialize;
use vitrail_core::actor::{Actor, ActorKind};
use vitrail_core::approval;
use vitrail_core::project_status::ProjectStatus;
use vitrail_core::types::DbId;

use crate::error::{step, WorkflowError};
use crate::models::project::Project;
use crate::models::proof::{ApproveProofRequest, CreateProofRequest, DeclineProofRequest};
use crate::occ;
use crate::repositories::{InlayRepo, ProjectRepo};
use crate::DbPool;

pub use proofs::{ProofApproved, ProofCreated, ProofDeclined};

/// How many times an internal (coordinator-issued, not caller-versioned)
/// conditional write is re-read and retried before giving up as a conflict.
pub(crate) const MAX_OCC_RETRIES: usize = 3;

/// Coordinates the proof workflow's transactional entry points.
#[derive(Clone)]
pub struct ProofWorkflow {
    pool: DbPool,
    timeout: Duration,
}

impl ProofWorkflow {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Create a new design proof on an inlay.
    ///
    /// Atomically: chat announcement, supersession of any still-pending
    /// proof, proof insert with the next dense version number, inlay
    /// preview update, notification.
    pub async fn create_proof(
        &self,
        inlay_id: DbId,
        request: &CreateProofRequest,
        actor: &Actor,
    ) -> Result<ProofCreated, WorkflowError> {
        self.bounded(proofs::create_proof(&self.pool, inlay_id, request, actor))
            .await
    }

    /// Approve a pending proof, re-aggregating the project status.
    pub async fn approve_proof(
        &self,
        proof_id: DbId,
        request: &ApproveProofRequest,
        actor: &Actor,
    ) -> Result<ProofApproved, WorkflowError> {
        self.bounded(proofs::approve_proof(&self.pool, proof_id, request, actor))
            .await
    }

    /// Decline a pending proof with a reason, regressing the project to
    /// `designing` if it was pending approval or approved.
    pub async fn decline_proof(
        &self,
        proof_id: DbId,
        request: &DeclineProofRequest,
        actor: &Actor,
    ) -> Result<ProofDeclined, WorkflowError> {
        self.bounded(proofs::decline_proof(&self.pool, proof_id, request, actor))
            .await
    }

    /// Explicit project status transition (submission, order placement,
    /// fulfilment progression, administrative cancellation).
    pub async fn transition_project(
        &self,
        project_id: DbId,
        target: &str,
        expected_version: i32,
        actor: &Actor,
    ) -> Result<Project, WorkflowError> {
        let fut = transition_project(&self.pool, project_id, target, expected_version, actor);
        self.bounded(fut).await
    }

    /// Read the stored project status together with the derived aggregation
    /// summary. Read-only; never writes.
    pub async fn project_status_summary(
        &self,
        project_id: DbId,
        actor: &Actor,
    ) -> Result<ProjectStatusSummary, WorkflowError> {
        let project: Project = occ::get(&self.pool, project_id).await?;
        ensure_project_access(actor, &project)?;
        let states = InlayRepo::approval_states(&self.pool, project_id)
            .await
            .map_err(step("scan project inlays"))?;

        let counted = states.iter().filter(|s| !s.excluded_from_order).count();
        let approved = states
            .iter()
            .filter(|s| !s.excluded_from_order && s.approved_proof_id.is_some())
            .count();

        Ok(ProjectStatusSummary {
            project_id,
            status: project.status.clone(),
            approved: project.approved,
            fully_approved: approval::fully_approved(&states),
            total_inlays: states.len(),
            counted_inlays: counted,
            approved_inlays: approved,
            outstanding_inlays: counted - approved,
        })
    }
}

impl ProofWorkflow {
    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, WorkflowError>>,
    ) -> Result<T, WorkflowError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(WorkflowError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

/// Project status plus the aggregation-derived approval picture.
#[derive(Debug, Serialize)]
pub struct ProjectStatusSummary {
    pub project_id: DbId,
    pub status: String,
    pub approved: bool,
    pub fully_approved: bool,
    pub total_inlays: usize,
    /// Inlays that count toward the order (not excluded).
    pub counted_inlays: usize,
    pub approved_inlays: usize,
    pub outstanding_inlays: usize,
}

/// Dealership actors may only touch their own dealership's projects.
///
/// Reported as `NotFound` rather than a dedicated authorization error so a
/// foreign project's existence is not revealed. Internal actors see
/// everything.
pub fn ensure_project_access(actor: &Actor, project: &Project) -> Result<(), WorkflowError> {
    match actor.kind {
        ActorKind::Internal => Ok(()),
        ActorKind::Dealership { dealership_id } if dealership_id == project.dealership_id => {
            Ok(())
        }
        ActorKind::Dealership { .. } => Err(WorkflowError::NotFound {
            entity: "Project",
            id: project.id,
        }),
    }
}

async fn transition_project(
    pool: &DbPool,
    project_id: DbId,
    target: &str,
    expected_version: i32,
    actor: &Actor,
) -> Result<Project, WorkflowError> {
    let target = ProjectStatus::parse(target)
        .map_err(|_| WorkflowError::Validation(format!("unknown project status '{target}'")))?;

    let project: Project = occ::get(pool, project_id).await?;
    ensure_project_access(actor, &project)?;
    let current = ProjectStatus::parse(&project.status)?;

    if !current.can_transition_to(target) {
        return Err(WorkflowError::InvalidState(format!(
            "project cannot move from '{current}' to '{target}'"
        )));
    }

    // The derived flag follows the status for approval-adjacent states and
    // is otherwise left as stored.
    let approved = match target {
        ProjectStatus::Approved => true,
        ProjectStatus::Draft | ProjectStatus::Designing | ProjectStatus::PendingApproval => false,
        _ => project.approved,
    };

    let updated = ProjectRepo::set_status(
        pool,
        project_id,
        expected_version,
        target.as_str(),
        approved,
    )
    .await
    .map_err(step("transition project status"))?;
    let updated = occ::require_matched(updated, project_id)?;

    tracing::info!(
        project_id,
        from = %current,
        to = %target,
        actor_id = actor.user_id,
        "Project status transitioned"
    );

    Ok(updated)
}
