//! Pure domain logic for the Vitrail order-fulfillment engine.
//!
//! This crate holds everything that does not touch the database: the
//! shared ID/timestamp types, the error taxonomy, the actor and chat-sender
//! types, the project and proof state machines, the approval aggregator,
//! and the milestone/blocker/invoice vocabularies.

pub mod actor;
pub mod approval;
pub mod blocker;
pub mod chat;
pub mod error;
pub mod invoice;
pub mod milestone;
pub mod project_status;
pub mod proof;
pub mod types;
