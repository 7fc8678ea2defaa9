//! # Validation Module
//!
//! Input validation utilities for Zaiqa.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store Operation (Rust)                                       │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain invariants (cart caps, status machine)               │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Profile;
use crate::MAX_FEEDBACK_COMMENT_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value for an add-to-cart call.
///
/// ## Rules
/// - Must be positive (> 0). Adding zero or negative quantities is
///   rejected outright, never silently tolerated.
///
/// Upper caps are the cart's concern: only the cart knows the merged
/// quantity after an add.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a feedback star rating.
///
/// ## Rules
/// - Must be between 1 and 5 (a zero rating means "not selected yet"
///   on the feedback screen and is not submittable)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Feedback: Submit                                                       │
/// │                                                                         │
/// │  User taps 4 stars, writes a comment                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_rating(4) ← THIS FUNCTION                                    │
/// │       │                                                                 │
/// │       ├── rating < 1 or > 5? → Error: "rating must be between 1 and 5" │
/// │       │                                                                 │
/// │       └── OK → Proceed with submit_order_feedback                      │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a feedback comment.
///
/// ## Rules
/// - Can be empty (rating-only feedback is fine)
/// - Maximum 500 characters
pub fn validate_feedback_comment(comment: &str) -> ValidationResult<()> {
    if comment.chars().count() > MAX_FEEDBACK_COMMENT_LEN {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: MAX_FEEDBACK_COMMENT_LEN,
        });
    }

    Ok(())
}

/// Validates a profile before it replaces the stored one.
///
/// ## Rules
/// - Name, phone, and address must not be empty (orders snapshot these
///   fields; an order without an address cannot be delivered)
/// - Email is free-form and may be empty
pub fn validate_profile(profile: &Profile) -> ValidationResult<()> {
    if profile.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if profile.phone.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if profile.address.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_rating() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }

        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_feedback_comment() {
        assert!(validate_feedback_comment("").is_ok());
        assert!(validate_feedback_comment("Great karahi!").is_ok());
        assert!(validate_feedback_comment(&"a".repeat(500)).is_ok());
        assert!(validate_feedback_comment(&"a".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_profile() {
        assert!(validate_profile(&Profile::default()).is_ok());

        let mut missing_name = Profile::default();
        missing_name.name = "  ".to_string();
        assert!(validate_profile(&missing_name).is_err());

        let mut missing_address = Profile::default();
        missing_address.address = String::new();
        assert!(validate_profile(&missing_address).is_err());

        // Email may be empty
        let mut no_email = Profile::default();
        no_email.email = String::new();
        assert!(validate_profile(&no_email).is_ok());
    }
}
