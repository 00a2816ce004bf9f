//! Actor identity and chat-sender types.
//!
//! Authentication itself is handled upstream; the workflow engine only sees
//! a resolved [`Actor`] and uses it to stamp `*_by` columns and to attribute
//! chat messages.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Which side of the order a user acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorKind {
    /// A dealership-side user; carries the owning dealership's id for
    /// project scoping.
    Dealership { dealership_id: DbId },
    /// An internal (manufacturer-side) user.
    Internal,
}

/// A resolved, authenticated user acting on the system.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    pub kind: ActorKind,
}

impl Actor {
    pub fn dealership(user_id: DbId, dealership_id: DbId) -> Self {
        Self {
            user_id,
            kind: ActorKind::Dealership { dealership_id },
        }
    }

    pub fn internal(user_id: DbId) -> Self {
        Self {
            user_id,
            kind: ActorKind::Internal,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, ActorKind::Internal)
    }

    /// The dealership this actor belongs to, if any.
    pub fn dealership_id(&self) -> Option<DbId> {
        match self.kind {
            ActorKind::Dealership { dealership_id } => Some(dealership_id),
            ActorKind::Internal => None,
        }
    }

    /// The chat sender identity for messages written by this actor.
    pub fn sender(&self) -> Sender {
        match self.kind {
            ActorKind::Dealership { .. } => Sender::Dealership(self.user_id),
            ActorKind::Internal => Sender::Internal(self.user_id),
        }
    }
}

/// The author of a chat message: exactly one of a dealership user or an
/// internal user.
///
/// The `inlay_chats` table stores this as a nullable FK pair; this enum makes
/// "exactly one is set" a type-level invariant everywhere above the row
/// mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum Sender {
    Dealership(DbId),
    Internal(DbId),
}

impl Sender {
    /// Split into the `(dealership_user_id, internal_user_id)` column pair.
    pub fn into_columns(self) -> (Option<DbId>, Option<DbId>) {
        match self {
            Sender::Dealership(id) => (Some(id), None),
            Sender::Internal(id) => (None, Some(id)),
        }
    }

    /// Rebuild from the column pair. Returns `None` unless exactly one side
    /// is set.
    pub fn from_columns(
        dealership_user_id: Option<DbId>,
        internal_user_id: Option<DbId>,
    ) -> Option<Self> {
        match (dealership_user_id, internal_user_id) {
            (Some(id), None) => Some(Sender::Dealership(id)),
            (None, Some(id)) => Some(Sender::Internal(id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_round_trips_through_columns() {
        let (d, i) = Sender::Dealership(7).into_columns();
        assert_eq!(Sender::from_columns(d, i), Some(Sender::Dealership(7)));

        let (d, i) = Sender::Internal(3).into_columns();
        assert_eq!(Sender::from_columns(d, i), Some(Sender::Internal(3)));
    }

    #[test]
    fn test_sender_rejects_both_or_neither() {
        assert_eq!(Sender::from_columns(Some(1), Some(2)), None);
        assert_eq!(Sender::from_columns(None, None), None);
    }

    #[test]
    fn test_actor_sender_matches_kind() {
        assert_eq!(Actor::dealership(5, 9).sender(), Sender::Dealership(5));
        assert_eq!(Actor::internal(4).sender(), Sender::Internal(4));
    }

    #[test]
    fn test_dealership_id_only_for_dealership_actors() {
        assert_eq!(Actor::dealership(5, 9).dealership_id(), Some(9));
        assert_eq!(Actor::internal(4).dealership_id(), None);
    }
}
