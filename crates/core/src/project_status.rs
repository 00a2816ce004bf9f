//! Project status state machine.
//!
//! A project moves `draft -> designing -> pending-approval <-> approved ->
//! ordered -> in-production -> shipped -> delivered -> invoiced -> completed`.
//! `cancelled` is reachable from any non-terminal state via an administrative
//! action. Statuses are stored as text; [`ProjectStatus::parse`] and
//! [`ProjectStatus::as_str`] convert at the row boundary.

use std::fmt;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Draft,
    Designing,
    PendingApproval,
    Approved,
    Ordered,
    InProduction,
    Shipped,
    Delivered,
    Invoiced,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Designing => "designing",
            ProjectStatus::PendingApproval => "pending-approval",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Ordered => "ordered",
            ProjectStatus::InProduction => "in-production",
            ProjectStatus::Shipped => "shipped",
            ProjectStatus::Delivered => "delivered",
            ProjectStatus::Invoiced => "invoiced",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "designing" => Ok(ProjectStatus::Designing),
            "pending-approval" => Ok(ProjectStatus::PendingApproval),
            "approved" => Ok(ProjectStatus::Approved),
            "ordered" => Ok(ProjectStatus::Ordered),
            "in-production" => Ok(ProjectStatus::InProduction),
            "shipped" => Ok(ProjectStatus::Shipped),
            "delivered" => Ok(ProjectStatus::Delivered),
            "invoiced" => Ok(ProjectStatus::Invoiced),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            other => Err(CoreError::Internal(format!(
                "unknown project status '{other}' in database"
            ))),
        }
    }

    /// Terminal states admit no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }

    /// Whether design proofs may be created while the project is in this
    /// state. Proofs require the project to have been submitted for design
    /// (left `draft`) and not cancelled.
    pub const fn accepts_proofs(self) -> bool {
        !matches!(self, ProjectStatus::Draft | ProjectStatus::Cancelled)
    }

    /// Whether new inlays may be added to the project. Scope is frozen once
    /// the order is placed.
    pub const fn accepts_new_inlays(self) -> bool {
        matches!(
            self,
            ProjectStatus::Draft | ProjectStatus::Designing | ProjectStatus::PendingApproval
        )
    }

    /// Whether a declined proof regresses the project back to `designing`.
    pub const fn regresses_on_decline(self) -> bool {
        matches!(
            self,
            ProjectStatus::PendingApproval | ProjectStatus::Approved
        )
    }

    /// Whether the approval aggregator may rewrite this status. Once the
    /// order has been placed the aggregate no longer drives the project.
    pub const fn driven_by_aggregation(self) -> bool {
        matches!(
            self,
            ProjectStatus::Designing | ProjectStatus::PendingApproval | ProjectStatus::Approved
        )
    }

    /// Whether an invoice draft may be generated for the project.
    pub const fn order_ready(self) -> bool {
        matches!(
            self,
            ProjectStatus::Approved
                | ProjectStatus::Ordered
                | ProjectStatus::InProduction
                | ProjectStatus::Shipped
                | ProjectStatus::Delivered
        )
    }

    /// The forward neighbour in the fulfilment chain, if any.
    const fn next_in_chain(self) -> Option<ProjectStatus> {
        match self {
            ProjectStatus::Draft => Some(ProjectStatus::Designing),
            ProjectStatus::Designing => Some(ProjectStatus::PendingApproval),
            ProjectStatus::PendingApproval => Some(ProjectStatus::Approved),
            ProjectStatus::Approved => Some(ProjectStatus::Ordered),
            ProjectStatus::Ordered => Some(ProjectStatus::InProduction),
            ProjectStatus::InProduction => Some(ProjectStatus::Shipped),
            ProjectStatus::Shipped => Some(ProjectStatus::Delivered),
            ProjectStatus::Delivered => Some(ProjectStatus::Invoiced),
            ProjectStatus::Invoiced => Some(ProjectStatus::Completed),
            ProjectStatus::Completed | ProjectStatus::Cancelled => None,
        }
    }

    /// Validate a transition from `self` to `to`.
    ///
    /// Allowed moves: one step forward along the chain, the
    /// `pending-approval <-> approved` pair in both directions, the decline
    /// regression `pending-approval|approved -> designing`, and
    /// `-> cancelled` from any non-terminal state.
    pub fn can_transition_to(self, to: ProjectStatus) -> bool {
        if self == to {
            return false;
        }
        if to == ProjectStatus::Cancelled {
            return !self.is_terminal();
        }
        if self.next_in_chain() == Some(to) {
            return true;
        }
        matches!(
            (self, to),
            (ProjectStatus::Approved, ProjectStatus::PendingApproval)
                | (ProjectStatus::PendingApproval, ProjectStatus::Designing)
                | (ProjectStatus::Approved, ProjectStatus::Designing)
        )
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
