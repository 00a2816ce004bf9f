//! Manufacturing milestone vocabulary and validation.
//!
//! Milestones are an append-only record of production progress. Advancement
//! is always a new row; the only permitted update is a notes correction.

/// Production steps an inlay moves through, in shop-floor order.
pub const VALID_STEPS: &[&str] = &[
    "glass-cutting",
    "engraving",
    "inlay-fitting",
    "firing",
    "polishing",
    "quality-check",
    "packaging",
];

/// The inlay entered a production step.
pub const EVENT_ENTERED: &str = "entered";

/// The inlay completed a production step.
pub const EVENT_COMPLETED: &str = "completed";

/// A previously recorded step was undone (rework).
pub const EVENT_REVERTED: &str = "reverted";

/// All valid milestone event types.
pub const VALID_EVENT_TYPES: &[&str] = &[EVENT_ENTERED, EVENT_COMPLETED, EVENT_REVERTED];

pub fn validate_step(step: &str) -> Result<(), String> {
    if VALID_STEPS.contains(&step) {
        Ok(())
    } else {
        Err(format!(
            "Invalid production step '{step}'. Must be one of: {}",
            VALID_STEPS.join(", ")
        ))
    }
}

pub fn validate_event_type(event_type: &str) -> Result<(), String> {
    if VALID_EVENT_TYPES.contains(&event_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid milestone event type '{event_type}'. Must be one of: {}",
            VALID_EVENT_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_steps_accepted() {
        for step in VALID_STEPS {
            assert!(validate_step(step).is_ok());
        }
    }

    #[test]
    fn test_unknown_step_rejected() {
        let result = validate_step("annealing");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid production step"));
    }

    #[test]
    fn test_event_types() {
        assert!(validate_event_type(EVENT_ENTERED).is_ok());
        assert!(validate_event_type(EVENT_COMPLETED).is_ok());
        assert!(validate_event_type(EVENT_REVERTED).is_ok());
        assert!(validate_event_type("skipped").is_err());
    }
}
