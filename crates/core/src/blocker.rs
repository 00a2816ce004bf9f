//! Production blocker vocabulary.
//!
//! A `soft` blocker flags a concern; a `hard` blocker signals that a step
//! should not proceed. Blockers are recording-only: they do not currently
//! gate milestone transitions.

/// Flags a concern without halting progress.
pub const BLOCKER_TYPE_SOFT: &str = "soft";

/// Signals that progress through the current step should halt.
pub const BLOCKER_TYPE_HARD: &str = "hard";

pub const VALID_BLOCKER_TYPES: &[&str] = &[BLOCKER_TYPE_SOFT, BLOCKER_TYPE_HARD];

pub fn validate_blocker_type(blocker_type: &str) -> Result<(), String> {
    if VALID_BLOCKER_TYPES.contains(&blocker_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid blocker type '{blocker_type}'. Must be one of: {}",
            VALID_BLOCKER_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_types() {
        assert!(validate_blocker_type(BLOCKER_TYPE_SOFT).is_ok());
        assert!(validate_blocker_type(BLOCKER_TYPE_HARD).is_ok());
    }

    #[test]
    fn test_invalid_type() {
        assert!(validate_blocker_type("firm").is_err());
    }
}
