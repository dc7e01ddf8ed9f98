//! # Domain Types
//!
//! Wire-facing domain types shared between the REST client and the screens.
//!
//! ## Type Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog            Sales                 Stock                         │
//! │  ───────            ─────                 ─────                         │
//! │  Category           CartSnapshot          BranchStock                   │
//! │  CatalogItem        Transaction           StockInput                    │
//! │                     TransactionItem       StockTransfer                 │
//! │                     TransactionSummary    WarehouseStock                │
//! │                                                                         │
//! │  People             Loyalty                                             │
//! │  ──────             ───────                                             │
//! │  Customer           LoyaltyCard                                         │
//! │  User               LoyaltyStage                                        │
//! │  ObjectRef          CustomerLoyalty                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type round-trips the backend's camelCase JSON and exports a
//! TypeScript binding for the mobile frontend. Identifiers are
//! backend-issued integer ids throughout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartAdjustments, LineItem};

// =============================================================================
// Generic References
// =============================================================================

/// Minimal id/name pair used for dropdowns (branches, departments, rewards,
/// suppliers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ObjectRef {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A sellable catalog item as the sales screen sees it, scoped to the
/// cashier's branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,

    /// Current unit price. Frozen into the cart line when added.
    #[ts(as = "f64")]
    pub price: Decimal,

    /// Quantity available at the cashier's branch.
    #[ts(as = "f64")]
    pub quantity: Decimal,

    /// Discrete-count vs fractional-measure flag.
    pub sell_by_unit: bool,

    pub category_id: Option<i64>,
    pub image_path: Option<String>,
}

// =============================================================================
// Sales
// =============================================================================

/// The server-fetched cart used to hydrate a [`crate::cart::CartAggregator`]:
/// the adjustments record plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub cart: CartAdjustments,
    pub cart_items: Vec<LineItem>,
}

/// A finalized (or voided) sale as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    #[ts(as = "f64")]
    pub total_amount: Decimal,
    #[ts(as = "f64")]
    pub amount_received: Decimal,
    /// Human-readable receipt number, e.g. "BR1-000123".
    pub slip_no: String,
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
    pub branch: Option<String>,
    #[ts(as = "Option<f64>")]
    pub delivery_fee: Option<Decimal>,
    #[ts(as = "Option<f64>")]
    pub discount: Option<Decimal>,
    pub customer_name: Option<String>,
    pub cashier: Option<String>,
    pub is_voided: bool,
    pub is_paid: bool,
}

/// One line of a finalized sale. Name and price are the values at the time
/// of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionItem {
    pub id: i64,
    pub item_id: i64,
    pub name: String,
    #[ts(as = "f64")]
    pub price: Decimal,
    #[ts(as = "f64")]
    pub quantity: Decimal,
    /// Line amount (`price × quantity`) as persisted by the backend.
    #[ts(as = "f64")]
    pub amount: Decimal,
    pub sell_by_unit: bool,
}

/// Full receipt payload: the transaction header plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionRecord {
    pub transaction: Transaction,
    pub transaction_items: Vec<TransactionItem>,
}

/// Compact row for transaction history lists (paged, newest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionSummary {
    pub id: i64,
    #[ts(as = "f64")]
    pub total_amount: Decimal,
    pub slip_no: String,
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
    pub cashier_name: String,
    /// Present only on the headquarters-wide listing.
    pub branch_name: Option<String>,
    pub is_voided: bool,
    pub items: Vec<TransactionItemSummary>,
}

/// Item stub inside a history row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionItemSummary {
    pub id: i64,
    pub item_id: i64,
    pub item_name: String,
    #[ts(as = "f64")]
    pub quantity: Decimal,
}

/// A catalog item as headquarters manages it: full metadata including the
/// low-stock thresholds. `id` is absent when creating a new item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HqItem {
    pub id: Option<i64>,
    pub name: String,
    #[ts(as = "f64")]
    pub price: Decimal,
    pub category_id: Option<i64>,
    pub sell_by_unit: bool,
    pub unit_of_measure: Option<String>,
    /// Threshold below which a branch quantity is flagged low.
    #[ts(as = "f64")]
    pub store_critical_value: Decimal,
    /// Threshold below which the warehouse quantity is flagged low.
    #[ts(as = "f64")]
    pub wh_critical_value: Decimal,
    pub image_path: Option<String>,
}

// =============================================================================
// Central Sales
// =============================================================================

/// A catalog item on the central (warehouse-to-branch) sales screen, with
/// its availability at each branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CentralItem {
    pub id: i64,
    pub name: String,
    #[ts(as = "f64")]
    pub price: Decimal,
    pub sell_by_unit: bool,
    pub category_id: Option<i64>,
    pub branch_products: Vec<BranchProduct>,
}

/// One branch's slice of a [`CentralItem`]; also the unit the central cart
/// add operates on, with `quantity` as the amount to order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BranchProduct {
    pub id: i64,
    pub branch_id: i64,
    pub branch_name: String,
    #[ts(as = "f64")]
    pub quantity: Decimal,
}

/// History row for central transactions. Credit sales stay unpaid until
/// settled through the pending-payment flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CentralTransactionSummary {
    pub id: i64,
    #[ts(as = "f64")]
    pub total_amount: Decimal,
    pub slip_no: String,
    #[ts(as = "String")]
    pub transaction_date: DateTime<Utc>,
    pub branch_name: Option<String>,
    pub is_voided: bool,
    pub is_paid: bool,
    pub items: Vec<TransactionItemSummary>,
}

// =============================================================================
// Customers & Loyalty
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub contact_number: Option<String>,
    pub branch_id: Option<i64>,
    pub image_path: Option<String>,
}

/// A loyalty card program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoyaltyCard {
    pub id: i64,
    pub name: String,
    pub is_valid: bool,
}

/// One stage of a loyalty card, optionally tied to an item reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoyaltyStage {
    pub id: i64,
    pub card_id: i64,
    pub order_id: i64,
    pub item_reward_id: Option<i64>,
    pub reward_name: Option<String>,
}

/// A customer's progress on a loyalty card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerLoyalty {
    pub id: i64,
    pub customer_id: i64,
    pub card_id: i64,
    pub current_stage_id: Option<i64>,
    pub is_complete: bool,
}

// =============================================================================
// Stock
// =============================================================================

/// Stock level of one item at one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BranchStock {
    /// Branch-item record identity (the id stock mutations key on).
    pub id: i64,
    pub item_id: i64,
    pub name: String,
    #[ts(as = "f64")]
    pub quantity: Decimal,
    pub sell_by_unit: bool,
    pub image_path: Option<String>,
}

/// A stock delivery recorded against a branch item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockInput {
    pub id: Option<i64>,
    pub branch_item_id: i64,
    #[ts(as = "f64")]
    pub qty: Decimal,
    #[ts(as = "f64")]
    pub actual_total_qty: Decimal,
    #[ts(as = "f64")]
    pub expected_total_qty: Decimal,
    pub delivered_by: String,
    #[ts(as = "String")]
    pub delivery_date: DateTime<Utc>,
}

/// A transfer of stock between branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTransfer {
    pub id: Option<i64>,
    pub branch_from_id: i64,
    pub branch_to_id: i64,
    pub branch_item_id: i64,
    #[ts(as = "f64")]
    pub quantity: Decimal,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// One row of the headquarters stock monitor: an item with its warehouse
/// quantity and per-branch breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockMonitorRow {
    pub id: i64,
    pub name: String,
    pub sell_by_unit: bool,
    pub unit_of_measure: Option<String>,
    pub wh_id: i64,
    #[ts(as = "f64")]
    pub wh_qty: Decimal,
    pub wh_name: Option<String>,
    /// Threshold below which a branch quantity is flagged low.
    #[ts(as = "f64")]
    pub store_critical_value: Decimal,
    /// Threshold below which the warehouse quantity is flagged low.
    #[ts(as = "f64")]
    pub wh_critical_value: Decimal,
    pub branches: Vec<BranchQuantity>,
}

/// Per-branch quantity inside a [`StockMonitorRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BranchQuantity {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    #[ts(as = "f64")]
    pub quantity: Decimal,
}

/// Stock returned from a branch to the central warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReturnToWarehouse {
    pub id: Option<i64>,
    pub branch_item_id: i64,
    #[ts(as = "f64")]
    pub quantity: Decimal,
    pub reason: Option<String>,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

// =============================================================================
// Warehouse
// =============================================================================

/// Stock level of one item at the central warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarehouseStock {
    pub id: i64,
    pub item_id: i64,
    pub name: String,
    #[ts(as = "f64")]
    pub quantity: Decimal,
    pub sell_by_unit: bool,
}

/// A supplier delivery into the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarehouseStockInput {
    pub id: Option<i64>,
    pub wh_item_id: i64,
    pub supplier_id: i64,
    #[ts(as = "f64")]
    pub qty: Decimal,
    #[ts(as = "String")]
    pub delivery_date: DateTime<Utc>,
}

/// A supplier record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

/// Stock returned from the warehouse to a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReturnToSupplier {
    pub id: Option<i64>,
    pub wh_item_id: i64,
    pub supplier_id: i64,
    #[ts(as = "f64")]
    pub quantity: Decimal,
    pub reason: Option<String>,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

// =============================================================================
// Users
// =============================================================================

/// A system user (cashier, warehouse staff, or headquarters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub branch_id: Option<i64>,
    pub department_id: Option<i64>,
    pub has_head_access: bool,
    pub is_active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cart_snapshot_round_trips_camel_case() {
        let json = r#"{
            "cart": {
                "id": 4,
                "deliveryFee": 20.0,
                "discount": null,
                "subTotal": 52.5,
                "customerId": null,
                "customerName": null
            },
            "cartItems": [{
                "id": 11,
                "itemId": 3,
                "name": "Rice (kg)",
                "price": 52.5,
                "quantity": 1.0,
                "sellByUnit": false,
                "branchQty": 80.0,
                "branchName": "Main Branch",
                "branchItemId": 30
            }]
        }"#;

        let snapshot: CartSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.cart.delivery_fee, Some(dec!(20)));
        assert_eq!(snapshot.cart.discount, None);
        assert_eq!(snapshot.cart_items.len(), 1);
        assert_eq!(snapshot.cart_items[0].price, dec!(52.5));
        assert!(!snapshot.cart_items[0].sell_by_unit);

        let back = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(back["cartItems"][0]["branchItemId"], 30);
        assert_eq!(back["cart"]["subTotal"], 52.5);
    }

    #[test]
    fn transaction_summary_accepts_hq_and_branch_rows() {
        // Branch listing has no branchName; HQ listing includes it.
        let json = r#"{
            "id": 9,
            "totalAmount": 165.0,
            "slipNo": "BR1-000009",
            "transactionDate": "2025-01-05T15:07:00Z",
            "cashierName": "Ana",
            "isVoided": false,
            "items": [{"id": 1, "itemId": 2, "itemName": "Coke 330ml", "quantity": 3.0}]
        }"#;
        let row: TransactionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(row.branch_name, None);
        assert_eq!(row.items[0].quantity, dec!(3));
    }

    #[test]
    fn stock_monitor_row_carries_warehouse_and_branch_quantities() {
        // Row shape shared by the branch and warehouse stock monitors.
        let json = r#"{
            "id": 3,
            "name": "Rice (kg)",
            "sellByUnit": false,
            "unitOfMeasure": "kg",
            "whId": 30,
            "whQty": 250.5,
            "whName": "Central Warehouse",
            "storeCriticalValue": 10.0,
            "whCriticalValue": 50.0,
            "branches": [
                {"id": 7, "branchId": 1, "name": "Main Branch", "quantity": 80.0},
                {"id": 8, "branchId": 2, "name": "Annex", "quantity": 9.5}
            ]
        }"#;
        let row: StockMonitorRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.wh_qty, dec!(250.5));
        assert_eq!(row.branches.len(), 2);
        assert_eq!(row.branches[1].quantity, dec!(9.5));
    }

    #[test]
    fn hq_item_creation_payload_omits_id() {
        let item = HqItem {
            id: None,
            name: "Coke 330ml".to_string(),
            price: dec!(25.00),
            category_id: Some(2),
            sell_by_unit: true,
            unit_of_measure: Some("pcs".to_string()),
            store_critical_value: dec!(12),
            wh_critical_value: dec!(48),
            image_path: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["sellByUnit"], true);
        assert_eq!(value["storeCriticalValue"], 12.0);
        assert!(value["id"].is_null());
    }
}
