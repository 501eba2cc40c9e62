//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── ValidationError  - Boundary validation failures                   │
//! │  └── PricingError     - One offer could not be evaluated               │
//! │                                                                         │
//! │  bookstore-catalog errors (separate crate)                             │
//! │  └── CatalogError     - HTTP / config failures                         │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError::InvalidBook → caller            │
//! │        PricingError    → logged, offer priced as "no discount"         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised where data enters the system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Failure to evaluate a single offer.
///
/// Never surfaced to the basket display: the evaluator logs it and prices
/// that offer as the plain subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A slice offer with a zero bracket size.
    #[error("Slice offer has a zero slice value")]
    ZeroSliceValue,

    /// The candidate total does not fit in the money representation.
    #[error("Arithmetic overflow while evaluating {offer} offer")]
    Overflow { offer: String },

    /// Σ price × quantity does not fit in the money representation.
    #[error("Basket subtotal overflows the money representation")]
    SubtotalOverflow,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of evaluating one offer.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_messages() {
        assert_eq!(
            PricingError::ZeroSliceValue.to_string(),
            "Slice offer has a zero slice value"
        );

        let err = PricingError::Overflow {
            offer: "minus".to_string(),
        };
        assert_eq!(err.to_string(), "Arithmetic overflow while evaluating minus offer");
        assert_eq!(
            PricingError::SubtotalOverflow.to_string(),
            "Basket subtotal overflows the money representation"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "isbn".to_string(),
        };
        assert_eq!(err.to_string(), "isbn is required");

        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "title must be at most 255 characters");
    }
}
