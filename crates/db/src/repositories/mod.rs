//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any `PgExecutor` as the first argument — a `&PgPool` for
//! standalone calls, or `&mut *tx` when the workflow coordinator groups
//! several writes into one transaction.
//!
//! Conditional (versioned) updates return `Ok(None)` when zero rows
//! matched; callers classify that with [`crate::occ::require_matched`].

pub mod blocker_repo;
pub mod chat_repo;
pub mod dealership_repo;
pub mod inlay_repo;
pub mod invoice_repo;
pub mod milestone_repo;
pub mod notification_repo;
pub mod project_repo;
pub mod proof_repo;
pub mod user_repo;

pub use blocker_repo::BlockerRepo;
pub use chat_repo::ChatRepo;
pub use dealership_repo::DealershipRepo;
pub use inlay_repo::InlayRepo;
pub use invoice_repo::InvoiceRepo;
pub use milestone_repo::MilestoneRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::ProjectRepo;
pub use proof_repo::ProofRepo;
pub use user_repo::UserRepo;
