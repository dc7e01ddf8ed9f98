//! # Sales Session
//!
//! The checkout controller for one cashier: an owned
//! [`CartAggregator`] kept in sync with the server cart through a
//! [`SalesApi`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SalesSession                                    │
//! │                                                                         │
//! │  Screen ──► validate (bpims_core::validation, stock bound)              │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          SalesApi mutation ──► skipped (duplicate) ──► Ok(false)        │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          hydrate() ──► CartAggregator (set_cart + set_line_items)       │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          totals() ──► screen render                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs before anything touches the backend or the aggregator;
//! the aggregator itself never fails. After every accepted mutation the
//! session re-fetches the server cart, which is authoritative for ids and
//! merge results.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use bpims_core::{
    validation, CartAggregator, CatalogItem, CoreError, DerivedTotals, LineItem,
    TransactionRecord,
};

use crate::error::ClientError;
use crate::sales::SalesApi;

/// Errors raised by session operations: a business rule rejection or a
/// client/transport failure.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<bpims_core::ValidationError> for SessionError {
    fn from(err: bpims_core::ValidationError) -> Self {
        SessionError::Core(CoreError::from(err))
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// One cashier's checkout flow: server cart plus local aggregator.
#[derive(Debug)]
pub struct SalesSession {
    api: SalesApi,
    cart: CartAggregator,
    branch_id: i64,
}

impl SalesSession {
    pub fn new(api: SalesApi, branch_id: i64) -> Self {
        SalesSession {
            api,
            cart: CartAggregator::new(),
            branch_id,
        }
    }

    /// The local aggregator, for rendering lines and totals.
    pub fn cart(&self) -> &CartAggregator {
        &self.cart
    }

    /// Current derived totals.
    pub fn totals(&self) -> DerivedTotals {
        self.cart.totals()
    }

    pub fn branch_id(&self) -> i64 {
        self.branch_id
    }

    /// Replaces the local aggregator state with the server cart.
    pub async fn hydrate(&mut self) -> SessionResult<()> {
        let snapshot = self.api.get_cart().await?;
        self.cart.set_cart(snapshot.cart);
        self.cart.set_line_items(snapshot.cart_items);
        debug!(
            lines = self.cart.line_items().len(),
            "session hydrated from server cart"
        );
        Ok(())
    }

    // =========================================================================
    // Line Mutations
    // =========================================================================

    /// Adds a catalog item to the cart after quantity and stock validation.
    ///
    /// Returns `Ok(false)` when an identical request was already in flight
    /// and this one was skipped; the cart state is unchanged in that case.
    pub async fn add_item(&mut self, item: &CatalogItem, quantity: Decimal) -> SessionResult<bool> {
        validation::validate_quantity(quantity)?;
        validation::validate_unit_quantity(&item.name, quantity, item.sell_by_unit)?;
        check_stock_bound(self.cart.find_by_item_id(item.id), item, quantity)?;

        let issued = self.api.add_item_to_cart(item.id, quantity).await?.is_some();
        if issued {
            self.hydrate().await?;
        }
        Ok(issued)
    }

    /// Overwrites the quantity of one cart line after validation against
    /// that line's item kind and branch stock.
    pub async fn update_quantity(
        &mut self,
        cart_item_id: i64,
        quantity: Decimal,
    ) -> SessionResult<bool> {
        validation::validate_quantity(quantity)?;
        if let Some(line) = self
            .cart
            .line_items()
            .iter()
            .find(|line| line.id == cart_item_id)
        {
            validation::validate_unit_quantity(&line.name, quantity, line.sell_by_unit)?;
            if quantity > line.branch_qty {
                return Err(CoreError::InsufficientStock {
                    name: line.name.clone(),
                    available: line.branch_qty,
                    requested: quantity,
                }
                .into());
            }
        }

        let issued = self
            .api
            .update_item_quantity(cart_item_id, quantity)
            .await?
            .is_some();
        if issued {
            self.hydrate().await?;
        }
        Ok(issued)
    }

    /// Removes one cart line.
    pub async fn remove_item(&mut self, cart_item_id: i64) -> SessionResult<bool> {
        let issued = self.api.remove_cart_item(cart_item_id).await?.is_some();
        if issued {
            self.hydrate().await?;
        }
        Ok(issued)
    }

    /// Empties the cart on the server and locally.
    pub async fn clear(&mut self) -> SessionResult<bool> {
        let issued = self.api.delete_all_cart_items().await?.is_some();
        if issued {
            self.cart.clear_cart();
        }
        Ok(issued)
    }

    // =========================================================================
    // Adjustments
    // =========================================================================

    /// Sets or clears the delivery fee.
    pub async fn set_delivery_fee(&mut self, fee: Option<Decimal>) -> SessionResult<bool> {
        if let Some(fee) = fee {
            validation::validate_adjustment("delivery fee", fee)?;
        }
        let issued = self.api.update_delivery_fee(fee).await?.is_some();
        if issued {
            self.hydrate().await?;
        }
        Ok(issued)
    }

    /// Sets or clears the order-level discount. A discount larger than the
    /// amount otherwise due is rejected here, before the backend sees it.
    pub async fn set_discount(&mut self, discount: Option<Decimal>) -> SessionResult<bool> {
        if let Some(discount) = discount {
            validation::validate_adjustment("discount", discount)?;
            validation::validate_discount(discount, self.amount_before_discount())?;
        }
        let issued = self.api.update_discount(discount).await?.is_some();
        if issued {
            self.hydrate().await?;
        }
        Ok(issued)
    }

    /// Attaches a customer to the cart, or detaches with `None`.
    pub async fn set_customer(&mut self, customer_id: Option<i64>) -> SessionResult<bool> {
        let issued = self.api.update_customer(customer_id).await?.is_some();
        if issued {
            self.hydrate().await?;
        }
        Ok(issued)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Finalizes the cart into a transaction. The tendered amount must cover
    /// the total due. On success the local cart is cleared; line items are
    /// gone and adjustments are zeroed with the customer name kept for the
    /// receipt view.
    ///
    /// `Ok(None)` means an identical payment was already in flight.
    pub async fn checkout(
        &mut self,
        amount_received: Decimal,
    ) -> SessionResult<Option<TransactionRecord>> {
        let due = self.cart.totals().total_amount;
        if amount_received < due {
            return Err(CoreError::InsufficientPayment {
                received: amount_received,
                due,
            }
            .into());
        }

        let Some(record) = self.api.process_payment(amount_received).await? else {
            return Ok(None);
        };
        self.cart.clear_cart();
        info!(
            slip_no = %record.transaction.slip_no,
            total = %record.transaction.total_amount,
            "payment processed"
        );
        Ok(Some(record))
    }

    /// Amount due before the discount is applied: line sub-total plus the
    /// delivery fee.
    fn amount_before_discount(&self) -> Decimal {
        let fee = self
            .cart
            .adjustments()
            .map(|adj| adj.delivery_fee())
            .unwrap_or_default();
        self.cart.totals().sub_total + fee
    }
}

/// Rejects an add that would exceed the branch's available stock, counting
/// what is already in the cart for the same item.
fn check_stock_bound(
    existing: Option<&LineItem>,
    item: &CatalogItem,
    quantity: Decimal,
) -> Result<(), CoreError> {
    let already = existing.map(|line| line.quantity).unwrap_or_default();
    let requested = already + quantity;
    if requested > item.quantity {
        return Err(CoreError::InsufficientStock {
            name: item.name.clone(),
            available: item.quantity,
            requested,
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

    fn catalog_item(id: i64, quantity: Decimal, sell_by_unit: bool) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("Item {}", id),
            price: dec!(10),
            quantity,
            sell_by_unit,
            category_id: None,
            image_path: None,
        }
    }

    fn line(id: i64, item_id: i64, quantity: Decimal) -> LineItem {
        LineItem {
            id,
            item_id,
            name: format!("Item {}", item_id),
            price: dec!(10),
            quantity,
            sell_by_unit: true,
            branch_qty: dec!(100),
            branch_name: None,
            branch_item_id: item_id * 10,
        }
    }

    #[test]
    fn stock_bound_counts_quantity_already_in_cart() {
        let item = catalog_item(1, dec!(5), true);
        let existing = line(11, 1, dec!(3));

        assert!(check_stock_bound(Some(&existing), &item, dec!(2)).is_ok());

        let err = check_stock_bound(Some(&existing), &item, dec!(3)).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, dec!(5));
                assert_eq!(requested, dec!(6));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stock_bound_without_existing_line() {
        let item = catalog_item(2, dec!(1.5), false);
        assert!(check_stock_bound(None, &item, dec!(1.5)).is_ok());
        assert!(check_stock_bound(None, &item, dec!(1.51)).is_err());
    }
}
