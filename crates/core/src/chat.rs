//! Chat message vocabulary.
//!
//! Free-form messages come from users; the `proof_*` types are written only
//! by the workflow engine as a side effect of proof transitions.

/// Free-form text message.
pub const MESSAGE_TYPE_TEXT: &str = "text";

/// Free-form image message.
pub const MESSAGE_TYPE_IMAGE: &str = "image";

/// System entry announcing a newly sent proof.
pub const MESSAGE_TYPE_PROOF_SENT: &str = "proof_sent";

/// System entry recording a proof approval.
pub const MESSAGE_TYPE_PROOF_APPROVED: &str = "proof_approved";

/// System entry recording a proof decline.
pub const MESSAGE_TYPE_PROOF_DECLINED: &str = "proof_declined";

/// Message types a user may post directly.
pub const USER_MESSAGE_TYPES: &[&str] = &[MESSAGE_TYPE_TEXT, MESSAGE_TYPE_IMAGE];

/// Validate a user-posted message type.
pub fn validate_user_message_type(message_type: &str) -> Result<(), String> {
    if USER_MESSAGE_TYPES.contains(&message_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid message type '{message_type}'. Must be one of: {}",
            USER_MESSAGE_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_types_accepted() {
        assert!(validate_user_message_type(MESSAGE_TYPE_TEXT).is_ok());
        assert!(validate_user_message_type(MESSAGE_TYPE_IMAGE).is_ok());
    }

    #[test]
    fn test_system_types_rejected_from_users() {
        assert!(validate_user_message_type(MESSAGE_TYPE_PROOF_SENT).is_err());
        assert!(validate_user_message_type(MESSAGE_TYPE_PROOF_APPROVED).is_err());
        assert!(validate_user_message_type(MESSAGE_TYPE_PROOF_DECLINED).is_err());
        assert!(validate_user_message_type("gif").is_err());
    }
}
