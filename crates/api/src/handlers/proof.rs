//! Handlers for the proof workflow entry points (create, approve, decline)
//! and proof reads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use vitrail_core::types::DbId;
use vitrail_db::models::proof::{ApproveProofRequest, CreateProofRequest, DeclineProofRequest};
use vitrail_db::repositories::ProofRepo;

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::load_inlay_scoped;
use crate::middleware::auth::AuthActor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/inlays/{inlay_id}/proofs
///
/// Create a new design proof. Atomically announces it in chat, supersedes
/// any still-pending proof, and updates the inlay preview.
pub async fn create_proof(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
    Json(input): Json<CreateProofRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = state
        .workflow
        .create_proof(inlay_id, &input, auth.actor())
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/proofs/{proof_id}/approve
///
/// Approve a pending proof. Conditional on the caller's `proof_version`;
/// re-aggregates the project status in the same transaction.
pub async fn approve_proof(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(proof_id): Path<DbId>,
    Json(input): Json<ApproveProofRequest>,
) -> AppResult<impl IntoResponse> {
    let approved = state
        .workflow
        .approve_proof(proof_id, &input, auth.actor())
        .await?;

    Ok(Json(DataResponse { data: approved }))
}

/// POST /api/v1/proofs/{proof_id}/decline
///
/// Decline a pending proof with a reason, regressing the project to
/// `designing` if it was pending approval or approved.
pub async fn decline_proof(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(proof_id): Path<DbId>,
    Json(input): Json<DeclineProofRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let declined = state
        .workflow
        .decline_proof(proof_id, &input, auth.actor())
        .await?;

    Ok(Json(DataResponse { data: declined }))
}

/// GET /api/v1/proofs/{proof_id}
pub async fn get_proof(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(proof_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let proof = ProofRepo::find_by_id(&state.pool, proof_id)
        .await?
        .ok_or_else(|| not_found("InlayProof", proof_id))?;
    load_inlay_scoped(&state.pool, proof.inlay_id, auth.actor()).await?;
    Ok(Json(DataResponse { data: proof }))
}

/// GET /api/v1/inlays/{inlay_id}/proofs
///
/// The inlay's full proof history in version order.
pub async fn list_proofs(
    auth: AuthActor,
    State(state): State<AppState>,
    Path(inlay_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_inlay_scoped(&state.pool, inlay_id, auth.actor()).await?;
    let proofs = ProofRepo::list_for_inlay(&state.pool, inlay_id).await?;
    Ok(Json(DataResponse { data: proofs }))
}
