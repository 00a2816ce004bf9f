//! Project-level approval aggregation.
//!
//! A project is fully approved when every inlay that still counts toward the
//! order carries an approved proof. The aggregate is recomputed from scratch
//! on every approval rather than maintained incrementally, so it can never
//! drift from the inlay rows.

use crate::project_status::ProjectStatus;
use crate::types::DbId;

/// The slice of an inlay row the aggregator looks at.
#[derive(Debug, Clone, Copy)]
pub struct InlayApprovalState {
    pub excluded_from_order: bool,
    pub approved_proof_id: Option<DbId>,
}

/// Whether every non-excluded inlay has an approved proof.
///
/// A project with no non-excluded inlays is not fully approved: there is
/// nothing a dealership could have signed off on.
pub fn fully_approved(inlays: &[InlayApprovalState]) -> bool {
    let mut counted = 0;
    for inlay in inlays {
        if inlay.excluded_from_order {
            continue;
        }
        if inlay.approved_proof_id.is_none() {
            return false;
        }
        counted += 1;
    }
    counted > 0
}

/// The project status the aggregate dictates, given the current status.
///
/// Returns `None` when the current status is not driven by aggregation
/// (the order has already been placed, or the project was never submitted),
/// or when the dictated status equals the current one.
pub fn aggregated_status(
    current: ProjectStatus,
    inlays: &[InlayApprovalState],
) -> Option<ProjectStatus> {
    if !current.driven_by_aggregation() {
        return None;
    }
    let target = if fully_approved(inlays) {
        ProjectStatus::Approved
    } else {
        ProjectStatus::PendingApproval
    };
    (target != current).then_some(target)
}
