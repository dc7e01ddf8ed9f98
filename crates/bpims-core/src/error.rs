//! # Error Types
//!
//! Domain-specific error types for bpims-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bpims-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Pre-mutation input validation failures         │
//! │                                                                         │
//! │  bpims-client errors (separate crate)                                  │
//! │  └── ClientError      - HTTP transport / API envelope failures         │
//! │                                                                         │
//! │  Note the cart aggregator itself raises NO errors: its operations are  │
//! │  total functions. Validation runs before it is called, and transport   │
//! │  failures belong to the client crate.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations detected *around* the cart
/// aggregator (never inside it). They should be caught and translated to
/// user-facing messages by the screen.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds the branch's available stock.
    ///
    /// ## When This Occurs
    /// - Adding more of an item than `branch_qty` allows
    /// - Editing a line's quantity above the catalog bound
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: Decimal,
        requested: Decimal,
    },

    /// Payment received is below the amount due.
    #[error("Amount received {received} is less than total due {due}")]
    InsufficientPayment { received: Decimal, due: Decimal },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] before a cart or client mutation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// A unit-sale item was given a fractional quantity.
    #[error("{name} is sold by unit; quantity {quantity} must be a whole number")]
    FractionalUnitQuantity { name: String, quantity: Decimal },

    /// Discount would push the cart total below zero.
    #[error("Discount {discount} exceeds the amount due {due}")]
    DiscountExceedsTotal { discount: Decimal, due: Decimal },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Coke 330ml".to_string(),
            available: dec!(3),
            requested: dec!(5),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Coke 330ml: available 3, requested 5"
        );
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::FractionalUnitQuantity {
            name: "Canned Tuna".to_string(),
            quantity: dec!(1.5),
        };
        assert_eq!(
            err.to_string(),
            "Canned Tuna is sold by unit; quantity 1.5 must be a whole number"
        );
    }

    #[test]
    fn validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
