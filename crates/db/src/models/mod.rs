//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request/create DTOs for inserts and transitions
//!
//! Entity structs carry the versioned-row quartet (`uuid`, `version`,
//! `created_at`, `updated_at`); the matching `VersionedRecord` impls live
//! next to the SQL in the repository modules.

pub mod blocker;
pub mod chat;
pub mod dealership;
pub mod inlay;
pub mod invoice;
pub mod milestone;
pub mod notification;
pub mod project;
pub mod proof;
pub mod user;
