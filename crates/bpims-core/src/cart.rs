//! # Cart Aggregator
//!
//! In-memory state container for the current sales session's cart.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Aggregator Operations                           │
//! │                                                                         │
//! │  Screen Gesture            Operation               State Change         │
//! │  ──────────────            ─────────               ────────────         │
//! │                                                                         │
//! │  Tap product ────────────► add_line_item() ──────► merge or append     │
//! │                                                                         │
//! │  Edit quantity ──────────► update_line_item() ───► replace in place    │
//! │                                                                         │
//! │  Swipe to delete ────────► remove_line_item() ───► remove by id        │
//! │                                                                         │
//! │  Fee/discount screen ────► set_cart() ───────────► replace adjustments │
//! │                                                                         │
//! │  Server hydration ───────► set_line_items() ─────► replace collection  │
//! │                                                                         │
//! │  Abandon / checkout ─────► clear_cart() ─────────► empty + zero fees   │
//! │                                                                         │
//! │  EVERY mutation ends with an eager recalculate_totals() pass, so       │
//! │  consumers always observe consistent derived totals.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The aggregator is a plain owned value, not a global store. The session
//! controller (or a test) holds exactly one and mutates it from a single
//! logical call site at a time, so no locking is needed here.
//!
//! ## Failure Semantics
//! Every operation is a total function over in-memory state. Stock bounds
//! and quantity rules are validated by the caller *before* mutating (see
//! [`crate::validation`]); misses on update/remove are silent no-ops.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `id` is the cart-line identity issued by the backend, distinct from
///   `item_id` (the catalog identity). Merging is keyed on `item_id`;
///   update/remove are keyed on `id`.
/// - `price` and the branch metadata are frozen at the time the line was
///   first added; a merge never refreshes them from the candidate.
/// - `quantity` is stored as a raw decimal even for `sell_by_unit` items;
///   whole-unit rendering is a presentation concern
///   (see [`crate::format::format_quantity`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Cart-line identity (unique within this cart).
    pub id: i64,

    /// Catalog item identity. Unique across the collection.
    pub item_id: i64,

    /// Display label shown on screens and receipts.
    pub name: String,

    /// Unit price, non-negative decimal.
    #[ts(as = "f64")]
    pub price: Decimal,

    /// Quantity, non-negative decimal. Fractional when `sell_by_unit` is
    /// false (weighed/measured goods).
    #[ts(as = "f64")]
    pub quantity: Decimal,

    /// True for discrete-count items, false for fractional-measure items.
    pub sell_by_unit: bool,

    /// Maximum sellable quantity as reported by the catalog when the item
    /// was added. External validation bound only; the aggregator does not
    /// enforce it.
    #[ts(as = "f64")]
    pub branch_qty: Decimal,

    /// Name of the branch the stock belongs to. Opaque provenance.
    pub branch_name: Option<String>,

    /// Branch-item record identity. Opaque provenance.
    pub branch_item_id: i64,
}

impl LineItem {
    /// Line total (`price × quantity`).
    #[inline]
    pub fn line_total(&self) -> Decimal {
        self.price * self.quantity
    }
}

// =============================================================================
// Cart Adjustments
// =============================================================================

/// Adjustments layered on top of the line items: delivery fee, discount,
/// and the attached customer.
///
/// The record mirrors the backend's cart row. `delivery_fee` and `discount`
/// are optional on the wire; an absent value is treated as zero in totals.
/// `customer_id` and `customer_name` are either both set or both cleared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartAdjustments {
    /// Backend cart record identity.
    pub id: i64,

    /// Delivery fee, non-negative. Absent means no fee.
    #[ts(as = "Option<f64>")]
    pub delivery_fee: Option<Decimal>,

    /// Discount, non-negative. Absent means no discount. The aggregator
    /// accepts any value here; range policy belongs to the calling screen.
    #[ts(as = "Option<f64>")]
    pub discount: Option<Decimal>,

    /// Server-side subtotal snapshot carried on the cart record.
    #[ts(as = "f64")]
    pub sub_total: Decimal,

    /// Attached customer identity, if any.
    pub customer_id: Option<i64>,

    /// Attached customer display name, if any.
    pub customer_name: Option<String>,
}

impl CartAdjustments {
    /// Delivery fee with the absent-means-zero rule applied.
    #[inline]
    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee.unwrap_or(Decimal::ZERO)
    }

    /// Discount with the absent-means-zero rule applied.
    #[inline]
    pub fn discount(&self) -> Decimal {
        self.discount.unwrap_or(Decimal::ZERO)
    }

    /// Attaches a customer (both fields set together).
    pub fn attach_customer(&mut self, id: i64, name: impl Into<String>) {
        self.customer_id = Some(id);
        self.customer_name = Some(name.into());
    }

    /// Detaches the customer (both fields cleared together).
    pub fn detach_customer(&mut self) {
        self.customer_id = None;
        self.customer_name = None;
    }
}

// =============================================================================
// Derived Totals
// =============================================================================

/// Totals recomputed from the line items and adjustments after every
/// mutation. Never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DerivedTotals {
    /// `Σ price × quantity` over the line items, in insertion order.
    #[ts(as = "f64")]
    pub sub_total: Decimal,

    /// `Σ quantity` over the line items.
    #[ts(as = "f64")]
    pub total_cart_items: Decimal,

    /// `sub_total + delivery_fee − discount`. Deliberately NOT clamped at
    /// zero; an oversized discount produces a negative amount and the
    /// calling screen decides whether that is acceptable.
    #[ts(as = "f64")]
    pub total_amount: Decimal,
}

// =============================================================================
// Cart Aggregator
// =============================================================================

/// The cart aggregation and total-calculation engine.
///
/// ## Invariants
/// - Line items are unique by `item_id`; adding a duplicate merges
///   quantities into the existing line.
/// - Iteration order is insertion order of the distinct `item_id`s, so
///   summation is stable across recomputations.
/// - Derived totals always reflect the current line items and adjustments
///   by the time any mutation returns.
///
/// ## Lifecycle
/// Created empty when a sales session starts, mutated through the methods
/// below, and cleared when the cart is abandoned or the transaction is
/// finalized. It holds no identity across sessions; it is not a ledger.
#[derive(Debug, Clone, Default)]
pub struct CartAggregator {
    adjustments: Option<CartAdjustments>,
    line_items: Vec<LineItem>,
    totals: DerivedTotals,
}

impl CartAggregator {
    /// Creates an empty aggregator with zeroed totals.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Current line items in insertion order.
    #[inline]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Current adjustments record, if one has been set.
    #[inline]
    pub fn adjustments(&self) -> Option<&CartAdjustments> {
        self.adjustments.as_ref()
    }

    /// Current derived totals.
    #[inline]
    pub fn totals(&self) -> DerivedTotals {
        self.totals
    }

    /// True when the cart holds no line items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Looks up a line by catalog item id (the merge key).
    pub fn find_by_item_id(&self, item_id: i64) -> Option<&LineItem> {
        self.line_items.iter().find(|i| i.item_id == item_id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the adjustments record wholesale.
    ///
    /// Used when the fee, discount, or customer was edited externally (the
    /// delivery-fee and discount screens, or customer attachment). The
    /// caller's values are authoritative; no range checks happen here.
    pub fn set_cart(&mut self, adjustments: CartAdjustments) {
        self.adjustments = Some(adjustments);
        self.recalculate_totals();
    }

    /// Replaces the entire line-item collection.
    ///
    /// Used to hydrate from a server-fetched cart; the given order becomes
    /// the new insertion order.
    pub fn set_line_items(&mut self, items: Vec<LineItem>) {
        self.line_items = items;
        self.recalculate_totals();
    }

    /// Adds a line, merging by catalog `item_id`.
    ///
    /// ## Behavior
    /// - Existing `item_id`: only `quantity` is incremented; the existing
    ///   line's price and branch metadata stay frozen.
    /// - New `item_id`: appended at the end, preserving insertion order.
    ///
    /// The caller is expected to have already decremented the catalog's
    /// available quantity; the aggregator never talks to the catalog.
    pub fn add_line_item(&mut self, candidate: LineItem) {
        match self
            .line_items
            .iter_mut()
            .find(|i| i.item_id == candidate.item_id)
        {
            Some(existing) => existing.quantity += candidate.quantity,
            None => self.line_items.push(candidate),
        }
        self.recalculate_totals();
    }

    /// Replaces the line whose local `id` matches, keeping its position.
    ///
    /// Silent no-op when no line matches; a diagnostic is logged but the
    /// contract stays silent (stale screens legitimately race removals).
    pub fn update_line_item(&mut self, item: LineItem) {
        match self.line_items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => debug!(line_id = item.id, "update_line_item: no matching line"),
        }
        self.recalculate_totals();
    }

    /// Removes the line with the given local `id`, if present.
    ///
    /// Silent no-op when no line matches.
    pub fn remove_line_item(&mut self, id: i64) {
        let before = self.line_items.len();
        self.line_items.retain(|i| i.id != id);
        if self.line_items.len() == before {
            debug!(line_id = id, "remove_line_item: no matching line");
        }
        self.recalculate_totals();
    }

    /// Empties the cart.
    ///
    /// Line items are dropped and all derived totals go to zero. If an
    /// adjustments record exists it is kept alive with `delivery_fee`,
    /// `discount`, and `sub_total` zeroed and the customer fields left
    /// untouched; if none existed, none is created.
    pub fn clear_cart(&mut self) {
        self.line_items.clear();
        if let Some(adj) = self.adjustments.as_mut() {
            adj.delivery_fee = Some(Decimal::ZERO);
            adj.discount = Some(Decimal::ZERO);
            adj.sub_total = Decimal::ZERO;
        }
        self.totals = DerivedTotals::default();
    }

    /// Recomputes the derived totals from current state.
    ///
    /// Pure and idempotent: safe to call redundantly, never touches the
    /// line items or adjustments. Summation runs in insertion order so the
    /// result is bit-identical for identical state.
    pub fn recalculate_totals(&mut self) {
        let mut sub_total = Decimal::ZERO;
        let mut total_cart_items = Decimal::ZERO;
        for item in &self.line_items {
            sub_total += item.line_total();
            total_cart_items += item.quantity;
        }

        let delivery_fee = self
            .adjustments
            .as_ref()
            .map(CartAdjustments::delivery_fee)
            .unwrap_or(Decimal::ZERO);
        let discount = self
            .adjustments
            .as_ref()
            .map(CartAdjustments::discount)
            .unwrap_or(Decimal::ZERO);

        self.totals = DerivedTotals {
            sub_total,
            total_cart_items,
            total_amount: sub_total + delivery_fee - discount,
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: i64, item_id: i64, price: Decimal, quantity: Decimal) -> LineItem {
        LineItem {
            id,
            item_id,
            name: format!("Item {}", item_id),
            price,
            quantity,
            sell_by_unit: true,
            branch_qty: dec!(100),
            branch_name: Some("Main Branch".to_string()),
            branch_item_id: item_id * 10,
        }
    }

    #[test]
    fn add_merges_quantities_by_item_id() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 7, dec!(10.00), dec!(2)));
        cart.add_line_item(line(2, 7, dec!(99.00), dec!(3)));

        assert_eq!(cart.line_items().len(), 1);
        let merged = &cart.line_items()[0];
        assert_eq!(merged.quantity, dec!(5));
        // Non-quantity fields come from the FIRST add; price is not refreshed.
        assert_eq!(merged.id, 1);
        assert_eq!(merged.price, dec!(10.00));
    }

    #[test]
    fn add_preserves_first_seen_order() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 30, dec!(1), dec!(1)));
        cart.add_line_item(line(2, 10, dec!(1), dec!(1)));
        cart.add_line_item(line(3, 20, dec!(1), dec!(1)));
        cart.add_line_item(line(4, 10, dec!(1), dec!(1))); // merge, no reorder

        let order: Vec<i64> = cart.line_items().iter().map(|i| i.item_id).collect();
        assert_eq!(order, vec![30, 10, 20]);
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(2.50), dec!(4)));
        cart.add_line_item(line(2, 2, dec!(1.25), dec!(2)));

        let totals = cart.totals();
        assert_eq!(totals.sub_total, dec!(12.50));
        assert_eq!(totals.total_cart_items, dec!(6));
        assert_eq!(totals.total_amount, dec!(12.50));

        cart.set_cart(CartAdjustments {
            id: 1,
            delivery_fee: Some(dec!(30)),
            discount: Some(dec!(2.50)),
            ..Default::default()
        });
        assert_eq!(cart.totals().total_amount, dec!(40.00));

        cart.remove_line_item(2);
        assert_eq!(cart.totals().sub_total, dec!(10.00));
        assert_eq!(cart.totals().total_amount, dec!(37.50));
    }

    #[test]
    fn fractional_quantities_sum_exactly() {
        let mut cart = CartAggregator::new();
        let mut rice = line(1, 5, dec!(52.00), dec!(0.25));
        rice.sell_by_unit = false;
        cart.add_line_item(rice);
        let mut more_rice = line(2, 5, dec!(52.00), dec!(0.75));
        more_rice.sell_by_unit = false;
        cart.add_line_item(more_rice);

        assert_eq!(cart.totals().total_cart_items, dec!(1.00));
        assert_eq!(cart.totals().sub_total, dec!(52.00));
    }

    #[test]
    fn recalculate_is_idempotent() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(3.33), dec!(3)));
        cart.set_cart(CartAdjustments {
            id: 9,
            delivery_fee: Some(dec!(5)),
            ..Default::default()
        });

        let items_before = cart.line_items().to_vec();
        let adjustments_before = cart.adjustments().cloned();
        let first = cart.totals();
        cart.recalculate_totals();
        cart.recalculate_totals();

        assert_eq!(cart.totals(), first);
        assert_eq!(cart.line_items(), items_before.as_slice());
        assert_eq!(cart.adjustments(), adjustments_before.as_ref());
    }

    #[test]
    fn update_replaces_by_local_id_in_place() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(10), dec!(1)));
        cart.add_line_item(line(2, 2, dec!(20), dec!(1)));

        let mut edited = line(1, 1, dec!(10), dec!(4));
        edited.name = "Renamed".to_string();
        cart.update_line_item(edited);

        assert_eq!(cart.line_items()[0].quantity, dec!(4));
        assert_eq!(cart.line_items()[0].name, "Renamed");
        assert_eq!(cart.line_items()[1].item_id, 2); // order unchanged
        assert_eq!(cart.totals().sub_total, dec!(60));
    }

    #[test]
    fn update_and_remove_miss_are_silent_noops() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(10), dec!(2)));
        let before = cart.line_items().to_vec();

        cart.update_line_item(line(42, 42, dec!(1), dec!(1)));
        cart.remove_line_item(42);

        assert_eq!(cart.line_items(), before.as_slice());
        assert_eq!(cart.totals().sub_total, dec!(20));
    }

    #[test]
    fn clear_zeroes_fees_but_keeps_adjustments_identity() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(10), dec!(2)));
        cart.set_cart(CartAdjustments {
            id: 3,
            delivery_fee: Some(dec!(15)),
            discount: Some(dec!(5)),
            sub_total: dec!(20),
            customer_id: Some(77),
            customer_name: Some("Maria Cruz".to_string()),
        });

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.totals(), DerivedTotals::default());
        let adj = cart.adjustments().expect("adjustments record kept alive");
        assert_eq!(adj.delivery_fee(), Decimal::ZERO);
        assert_eq!(adj.discount(), Decimal::ZERO);
        assert_eq!(adj.sub_total, Decimal::ZERO);
        // Customer attachment survives the clear.
        assert_eq!(adj.customer_id, Some(77));
        assert_eq!(adj.customer_name.as_deref(), Some("Maria Cruz"));
    }

    #[test]
    fn clear_without_adjustments_stays_absent() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(10), dec!(1)));
        cart.clear_cart();
        assert!(cart.adjustments().is_none());
    }

    #[test]
    fn oversized_discount_goes_negative_unclamped() {
        let mut cart = CartAggregator::new();
        cart.add_line_item(line(1, 1, dec!(10), dec!(1)));
        cart.set_cart(CartAdjustments {
            id: 1,
            discount: Some(dec!(25)),
            ..Default::default()
        });

        assert_eq!(cart.totals().total_amount, dec!(-15));
    }

    /// The end-to-end scenario from the sales flow: merge, adjust, remove.
    #[test]
    fn sales_flow_scenario() {
        let mut cart = CartAggregator::new();

        cart.add_line_item(line(1, 1, dec!(10), dec!(2)));
        cart.add_line_item(line(2, 1, dec!(10), dec!(3)));
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.line_items()[0].quantity, dec!(5));
        assert_eq!(cart.totals().sub_total, dec!(50.00));
        assert_eq!(cart.totals().total_cart_items, dec!(5));

        cart.set_cart(CartAdjustments {
            id: 1,
            delivery_fee: Some(dec!(20)),
            discount: Some(dec!(5)),
            ..Default::default()
        });
        assert_eq!(cart.totals().total_amount, dec!(65.00));

        let line_id = cart.line_items()[0].id;
        cart.remove_line_item(line_id);
        assert_eq!(cart.totals().sub_total, dec!(0.00));
        assert_eq!(cart.totals().total_amount, dec!(15.00));
    }
}
