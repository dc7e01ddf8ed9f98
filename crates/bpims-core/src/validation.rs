//! # Validation Module
//!
//! Pre-mutation validation for cart and client operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen (frontend)                                            │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, run by the session controller                   │
//! │  ├── Quantity positivity and stock bounds                              │
//! │  └── Whole-unit rules for sell-by-unit items                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend service                                              │
//! │  └── Authoritative stock and pricing checks                            │
//! │                                                                         │
//! │  The cart aggregator itself validates NOTHING. Its operations are      │
//! │  total functions; everything here runs before it is called.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::cart::LineItem;
use crate::error::{CoreError, CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be strictly positive; zero-quantity lines are removals, not adds.
pub fn validate_quantity(qty: Decimal) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates the whole-unit rule for discrete-count items.
///
/// Items flagged `sell_by_unit` must carry an integral quantity at the
/// presentation boundary. Fractional-measure items (weight, length) may
/// carry any positive decimal.
pub fn validate_unit_quantity(name: &str, qty: Decimal, sell_by_unit: bool) -> ValidationResult<()> {
    if sell_by_unit && !qty.fract().is_zero() {
        return Err(ValidationError::FractionalUnitQuantity {
            name: name.to_string(),
            quantity: qty,
        });
    }
    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free or promo items).
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a delivery fee or discount amount.
pub fn validate_adjustment(field: &str, amount: Decimal) -> ValidationResult<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Screen-side discount policy: the discount may not exceed the amount due.
///
/// The aggregator itself never clamps `total_amount`; screens that forbid
/// negative totals call this before applying a discount.
pub fn validate_discount(discount: Decimal, amount_due: Decimal) -> ValidationResult<()> {
    validate_adjustment("discount", discount)?;
    if discount > amount_due {
        return Err(ValidationError::DiscountExceedsTotal {
            discount,
            due: amount_due,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();
    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }
    Ok(query.to_string())
}

/// Validates a customer or item display name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }
    Ok(())
}

// =============================================================================
// Composite Line-Item Validator
// =============================================================================

/// Full pre-add check for a candidate cart line.
///
/// Runs the quantity, unit, and price rules, then the external stock bound
/// (`branch_qty` as reported by the catalog when the candidate was built).
/// This is the gate the session controller runs before
/// `CartAggregator::add_line_item`.
pub fn validate_line_item(candidate: &LineItem) -> CoreResult<()> {
    validate_quantity(candidate.quantity)?;
    validate_unit_quantity(&candidate.name, candidate.quantity, candidate.sell_by_unit)?;
    validate_price(candidate.price)?;

    if candidate.quantity > candidate.branch_qty {
        return Err(CoreError::InsufficientStock {
            name: candidate.name.clone(),
            available: candidate.branch_qty,
            requested: candidate.quantity,
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
    use rust_decimal_macros::dec;

    fn candidate(qty: Decimal, branch_qty: Decimal, sell_by_unit: bool) -> LineItem {
        LineItem {
            id: 1,
            item_id: 1,
            name: "Coke 330ml".to_string(),
            price: dec!(25.00),
            quantity: qty,
            sell_by_unit,
            branch_qty,
            branch_name: None,
            branch_item_id: 10,
        }
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(dec!(1)).is_ok());
        assert!(validate_quantity(dec!(0.25)).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(dec!(-1)).is_err());
    }

    #[test]
    fn unit_items_need_whole_quantities() {
        assert!(validate_unit_quantity("Coke", dec!(3), true).is_ok());
        assert!(validate_unit_quantity("Coke", dec!(1.5), true).is_err());
        // Weighed items may be fractional.
        assert!(validate_unit_quantity("Rice", dec!(1.5), false).is_ok());
    }

    #[test]
    fn price_allows_zero_but_not_negative() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec!(10.50)).is_ok());
        assert!(validate_price(dec!(-0.01)).is_err());
    }

    #[test]
    fn discount_policy_rejects_oversized_discounts() {
        assert!(validate_discount(dec!(5), dec!(50)).is_ok());
        assert!(validate_discount(dec!(50), dec!(50)).is_ok());
        assert!(validate_discount(dec!(50.01), dec!(50)).is_err());
        assert!(validate_discount(dec!(-1), dec!(50)).is_err());
    }

    #[test]
    fn search_query_is_trimmed_and_bounded() {
        assert_eq!(validate_search_query("  coke  ").unwrap(), "coke");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn line_item_gate_enforces_stock_bound() {
        assert!(validate_line_item(&candidate(dec!(2), dec!(10), true)).is_ok());

        let err = validate_line_item(&candidate(dec!(11), dec!(10), true)).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        let err = validate_line_item(&candidate(dec!(1.5), dec!(10), true)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::FractionalUnitQuantity { .. })
        ));
    }
}
