//! The three proof workflow transactions: create, approve, decline.

use serde::Serialize;
use sqlx::{Postgres, Transaction};
use vitrail_core::actor::{Actor, ActorKind};
use vitrail_core::chat::{
    MESSAGE_TYPE_PROOF_APPROVED, MESSAGE_TYPE_PROOF_DECLINED, MESSAGE_TYPE_PROOF_SENT,
};
use vitrail_core::project_status::ProjectStatus;
use vitrail_core::proof::ProofStatus;
use vitrail_core::types::DbId;

use crate::error::{step, WorkflowError};
use crate::models::chat::{InlayChat, NewChatEntry};
use crate::models::inlay::Inlay;
use crate::models::notification::{NewNotification, AUDIENCE_DEALERSHIP, AUDIENCE_INTERNAL};
use crate::models::project::Project;
use crate::models::proof::{
    ApproveProofRequest, CreateProofRequest, DeclineProofRequest, InlayProof,
};
use crate::occ;
use crate::repositories::{ChatRepo, InlayRepo, NotificationRepo, ProofRepo};
use crate::DbPool;

use super::{aggregate, ensure_project_access, MAX_OCC_RETRIES};

/// Everything the create-proof transaction produced.
#[derive(Debug, Serialize)]
pub struct ProofCreated {
    pub proof: InlayProof,
    pub inlay: Inlay,
    pub chat_entry: InlayChat,
    /// How many previously pending proofs this one superseded (0 or 1 in
    /// practice; the single-pending invariant caps it).
    pub superseded: u64,
}

/// Everything the approve-proof transaction produced.
#[derive(Debug, Serialize)]
pub struct ProofApproved {
    pub proof: InlayProof,
    pub inlay: Inlay,
    pub project: Project,
}

/// Everything the decline-proof transaction produced.
#[derive(Debug, Serialize)]
pub struct ProofDeclined {
    pub proof: InlayProof,
    pub project: Project,
}

pub(super) async fn create_proof(
    pool: &DbPool,
    inlay_id: DbId,
    request: &CreateProofRequest,
    actor: &Actor,
) -> Result<ProofCreated, WorkflowError> {
    if request.design_asset_url.trim().is_empty() {
        return Err(WorkflowError::Validation(
            "design_asset_url must not be empty".into(),
        ));
    }

    let mut tx = pool.begin().await.map_err(step("begin transaction"))?;

    let inlay: Inlay = occ::get(&mut *tx, inlay_id).await?;
    let project: Project = occ::get(&mut *tx, inlay.project_id).await?;
    ensure_project_access(actor, &project)?;

    let project_status = ProjectStatus::parse(&project.status)?;
    if !project_status.accepts_proofs() {
        return Err(WorkflowError::InvalidState(format!(
            "project '{}' is {}; proofs can only be sent once it has been submitted for design",
            project.name, project.status
        )));
    }

    // Version numbers are dense over the inlay's full proof history.
    let version_number = ProofRepo::next_version_number(&mut *tx, inlay_id)
        .await
        .map_err(step("count existing proofs"))?;

    let chat_entry = ChatRepo::create(
        &mut *tx,
        &NewChatEntry {
            inlay_id,
            message_type: MESSAGE_TYPE_PROOF_SENT,
            body: Some(format!(
                "Design proof v{version_number} sent for review"
            )),
            image_url: Some(request.design_asset_url.clone()),
            sender: actor.sender(),
        },
    )
    .await
    .map_err(step("insert proof chat entry"))?;

    // Supersede before insert: the single-pending partial unique index is
    // checked per statement.
    let superseded = ProofRepo::supersede_pending(&mut *tx, inlay_id)
        .await
        .map_err(step("supersede pending proofs"))?;

    let proof = ProofRepo::insert(
        &mut *tx,
        inlay_id,
        version_number,
        &request.design_asset_url,
        request.price_group_id,
        request.price_cents,
        chat_entry.id,
    )
    .await
    .map_err(step("insert proof"))?;

    // The preview write is conditional on the version the caller read;
    // a concurrent edit to the inlay rolls the whole transaction back.
    let inlay = InlayRepo::set_preview(
        &mut *tx,
        inlay_id,
        request.inlay_version,
        &request.design_asset_url,
    )
    .await
    .map_err(step("update inlay preview"))?;
    let inlay = occ::require_matched(inlay, inlay_id)?;

    NotificationRepo::create(
        &mut *tx,
        &NewNotification {
            project_id: project.id,
            inlay_id: Some(inlay_id),
            event_type: MESSAGE_TYPE_PROOF_SENT,
            audience: AUDIENCE_DEALERSHIP,
            body: format!(
                "A new design proof (v{version_number}) is ready for review on '{}'",
                inlay.label
            ),
        },
    )
    .await
    .map_err(step("emit notification"))?;

    tx.commit().await.map_err(step("commit"))?;

    tracing::info!(
        inlay_id,
        proof_id = proof.id,
        version_number,
        superseded,
        actor_id = actor.user_id,
        "Proof created"
    );

    Ok(ProofCreated {
        proof,
        inlay,
        chat_entry,
        superseded,
    })
}

pub(super) async fn approve_proof(
    pool: &DbPool,
    proof_id: DbId,
    request: &ApproveProofRequest,
    actor: &Actor,
) -> Result<ProofApproved, WorkflowError> {
    if !matches!(actor.kind, ActorKind::Dealership { .. }) {
        return Err(WorkflowError::Validation(
            "only dealership users may approve proofs".into(),
        ));
    }

    let mut tx = pool.begin().await.map_err(step("begin transaction"))?;

    let proof: InlayProof = occ::get(&mut *tx, proof_id).await?;
    let inlay: Inlay = occ::get(&mut *tx, proof.inlay_id).await?;
    let project: Project = occ::get(&mut *tx, inlay.project_id).await?;
    ensure_project_access(actor, &project)?;

    let status = ProofStatus::parse(&proof.status)?;
    if !status.is_pending() {
        return Err(WorkflowError::InvalidState(format!(
            "proof v{} is {}; only a pending proof can be approved",
            proof.version_number, proof.status
        )));
    }

    // The single conditional write is the arbiter: two racers holding the
    // same version resolve as exactly one winner.
    let proof = ProofRepo::approve(&mut *tx, proof_id, request.proof_version, actor.user_id)
        .await
        .map_err(step("approve proof"))?;
    let proof = occ::require_matched(proof, proof_id)?;

    ChatRepo::create(
        &mut *tx,
        &NewChatEntry {
            inlay_id: inlay.id,
            message_type: MESSAGE_TYPE_PROOF_APPROVED,
            body: Some(format!("Proof v{} approved", proof.version_number)),
            image_url: None,
            sender: actor.sender(),
        },
    )
    .await
    .map_err(step("insert approval chat entry"))?;

    let inlay = set_approved_proof(&mut tx, inlay.id, proof_id).await?;

    // Re-aggregate the project from all sibling inlays; this transaction's
    // own write above is visible to the scan.
    let project = aggregate::persist_aggregate(&mut tx, inlay.project_id).await?;

    NotificationRepo::create(
        &mut *tx,
        &NewNotification {
            project_id: project.id,
            inlay_id: Some(inlay.id),
            event_type: MESSAGE_TYPE_PROOF_APPROVED,
            audience: AUDIENCE_INTERNAL,
            body: format!(
                "Proof v{} on '{}' was approved",
                proof.version_number, inlay.label
            ),
        },
    )
    .await
    .map_err(step("emit notification"))?;

    tx.commit().await.map_err(step("commit"))?;

    tracing::info!(
        proof_id,
        inlay_id = inlay.id,
        project_id = project.id,
        project_status = %project.status,
        actor_id = actor.user_id,
        "Proof approved"
    );

    Ok(ProofApproved {
        proof,
        inlay,
        project,
    })
}

pub(super) async fn decline_proof(
    pool: &DbPool,
    proof_id: DbId,
    request: &DeclineProofRequest,
    actor: &Actor,
) -> Result<ProofDeclined, WorkflowError> {
    // Rejected before any write begins.
    if request.reason.trim().is_empty() {
        return Err(WorkflowError::Validation(
            "a decline reason is required".into(),
        ));
    }
    if !matches!(actor.kind, ActorKind::Dealership { .. }) {
        return Err(WorkflowError::Validation(
            "only dealership users may decline proofs".into(),
        ));
    }

    let mut tx = pool.begin().await.map_err(step("begin transaction"))?;

    let proof: InlayProof = occ::get(&mut *tx, proof_id).await?;
    let inlay: Inlay = occ::get(&mut *tx, proof.inlay_id).await?;
    let project: Project = occ::get(&mut *tx, inlay.project_id).await?;
    ensure_project_access(actor, &project)?;

    let status = ProofStatus::parse(&proof.status)?;
    if !status.is_pending() {
        return Err(WorkflowError::InvalidState(format!(
            "proof v{} is {}; only a pending proof can be declined",
            proof.version_number, proof.status
        )));
    }

    let proof = ProofRepo::decline(
        &mut *tx,
        proof_id,
        request.proof_version,
        actor.user_id,
        request.reason.trim(),
    )
    .await
    .map_err(step("decline proof"))?;
    let proof = occ::require_matched(proof, proof_id)?;

    ChatRepo::create(
        &mut *tx,
        &NewChatEntry {
            inlay_id: inlay.id,
            message_type: MESSAGE_TYPE_PROOF_DECLINED,
            body: Some(format!(
                "Proof v{} declined: {}",
                proof.version_number,
                request.reason.trim()
            )),
            image_url: None,
            sender: actor.sender(),
        },
    )
    .await
    .map_err(step("insert decline chat entry"))?;

    // Declining always moves the project backward, never forward.
    let project = aggregate::regress_on_decline(&mut tx, inlay.project_id).await?;

    NotificationRepo::create(
        &mut *tx,
        &NewNotification {
            project_id: project.id,
            inlay_id: Some(inlay.id),
            event_type: MESSAGE_TYPE_PROOF_DECLINED,
            audience: AUDIENCE_INTERNAL,
            body: format!(
                "Proof v{} on '{}' was declined: {}",
                proof.version_number,
                inlay.label,
                request.reason.trim()
            ),
        },
    )
    .await
    .map_err(step("emit notification"))?;

    tx.commit().await.map_err(step("commit"))?;

    tracing::info!(
        proof_id,
        inlay_id = inlay.id,
        project_id = project.id,
        project_status = %project.status,
        actor_id = actor.user_id,
        "Proof declined"
    );

    Ok(ProofDeclined { proof, project })
}

/// Record the approved proof on the inlay.
///
/// Coordinator-issued write: the version used is the one read inside this
/// transaction, re-read on conflict a bounded number of times.
async fn set_approved_proof(
    tx: &mut Transaction<'_, Postgres>,
    inlay_id: DbId,
    proof_id: DbId,
) -> Result<Inlay, WorkflowError> {
    for _ in 0..MAX_OCC_RETRIES {
        let inlay: Inlay = occ::get(&mut **tx, inlay_id).await?;
        match InlayRepo::set_approved_proof(&mut **tx, inlay_id, inlay.version, proof_id)
            .await
            .map_err(step("record approved proof on inlay"))?
        {
            Some(updated) => return Ok(updated),
            None => continue,
        }
    }
    Err(WorkflowError::Conflict {
        entity: "Inlay",
        id: inlay_id,
    })
}
