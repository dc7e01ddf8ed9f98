//! # bpims-core: Pure Business Logic for the BPIMS Client
//!
//! This crate is the **heart** of the BPIMS client workspace. It contains
//! the cart aggregation engine and its supporting types as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BPIMS Client Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Frontend (screens, TypeScript)                │   │
//! │  │    Item Grid ──► Cart Screen ──► Payment ──► Receipt           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bpims-client (service layer)                    │   │
//! │  │    REST wrappers, request de-dup, SalesSession controller      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bpims-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   types   │  │ validation│  │  format   │  │   │
//! │  │   │ Aggregator│  │   DTOs    │  │   rules   │  │  helpers  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart aggregation and total-calculation engine
//! - [`types`] - Wire-facing domain types (catalog, transactions, stock)
//! - [`validation`] - Pre-mutation business rule validation
//! - [`format`] - Date/currency/quantity display helpers
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: network and file system access are FORBIDDEN here
//! 3. **Decimal Money**: all monetary values and quantities are
//!    `rust_decimal::Decimal` - never floats
//! 4. **Total Cart Operations**: the aggregator has no failure modes;
//!    validation runs before it is called
//!
//! ## Example Usage
//!
//! ```rust
//! use bpims_core::cart::{CartAdjustments, CartAggregator, LineItem};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartAggregator::new();
//! cart.add_line_item(LineItem {
//!     id: 1,
//!     item_id: 42,
//!     name: "Coke 330ml".to_string(),
//!     price: Decimal::new(2500, 2), // 25.00
//!     quantity: Decimal::from(2),
//!     sell_by_unit: true,
//!     branch_qty: Decimal::from(50),
//!     branch_name: None,
//!     branch_item_id: 7,
//! });
//!
//! assert_eq!(cart.totals().sub_total, Decimal::new(5000, 2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bpims_core::CartAggregator` instead of
// `use bpims_core::cart::CartAggregator`

pub use cart::{CartAdjustments, CartAggregator, DerivedTotals, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
