//! # Sales Endpoints
//!
//! The point-of-sale surface: catalog browsing, the server-side cart,
//! payment, transaction history, and receipt / report PDFs.
//!
//! The server cart is authoritative; [`get_cart`](SalesApi::get_cart) returns
//! the snapshot a [`bpims_core::CartAggregator`] is hydrated from, and every
//! cart mutation here is followed by a re-fetch on the sales screen.
//!
//! All mutations are de-duplicated by the HTTP layer; `Ok(None)` from a
//! mutation means an identical call was already in flight and this one was
//! skipped.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use bpims_core::{
    CartSnapshot, CatalogItem, Category, TransactionRecord, TransactionSummary,
};

use crate::error::ClientResult;
use crate::http::{ApiClient, Paged};

/// Sales endpoint wrapper.
#[derive(Debug, Clone)]
pub struct SalesApi {
    client: ApiClient,
}

impl SalesApi {
    pub fn new(client: ApiClient) -> Self {
        SalesApi { client }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// All product categories.
    pub async fn get_categories(&self) -> ClientResult<Vec<Category>> {
        self.client.get("getCategories", &[]).await
    }

    /// One page of sellable items for the cashier's branch, filtered by
    /// category and search text.
    pub async fn get_products(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
        branch_id: i64,
    ) -> ClientResult<Paged<CatalogItem>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
            ("branchId", branch_id.to_string()),
        ];
        self.client.get_paged("getProducts", &query).await
    }

    // =========================================================================
    // Server Cart
    // =========================================================================

    /// The cashier's open cart: adjustments record plus line items.
    pub async fn get_cart(&self) -> ClientResult<CartSnapshot> {
        self.client.get("getCart", &[]).await
    }

    /// Adds `quantity` of a catalog item to the open cart. The backend merges
    /// into an existing line for the same item.
    pub async fn add_item_to_cart(
        &self,
        item_id: i64,
        quantity: Decimal,
    ) -> ClientResult<Option<()>> {
        self.client
            .post_unit("addItemToCart", &json!({ "itemId": item_id, "quantity": quantity }))
            .await
    }

    /// Empties the open cart.
    pub async fn delete_all_cart_items(&self) -> ClientResult<Option<()>> {
        self.client.put_unit("deleteAllCartItems", &json!({})).await
    }

    /// Removes one cart line by its cart-item id.
    pub async fn remove_cart_item(&self, cart_item_id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("removeCartItem", &json!({ "cartItemId": cart_item_id }))
            .await
    }

    /// Overwrites the quantity on one cart line.
    pub async fn update_item_quantity(
        &self,
        cart_item_id: i64,
        quantity: Decimal,
    ) -> ClientResult<Option<()>> {
        self.client
            .put_unit(
                "updateItemQuantity",
                &json!({ "cartItemId": cart_item_id, "quantity": quantity }),
            )
            .await
    }

    /// Sets or clears the cart's delivery fee.
    pub async fn update_delivery_fee(
        &self,
        delivery_fee: Option<Decimal>,
    ) -> ClientResult<Option<()>> {
        self.client
            .put_unit("updateDeliveryFee", &json!({ "deliveryFee": delivery_fee }))
            .await
    }

    /// Sets or clears the cart's order-level discount.
    pub async fn update_discount(&self, discount: Option<Decimal>) -> ClientResult<Option<()>> {
        self.client
            .put_unit("updateDiscount", &json!({ "discount": discount }))
            .await
    }

    /// Attaches a customer to the cart, or detaches with `None`.
    pub async fn update_customer(&self, customer_id: Option<i64>) -> ClientResult<Option<()>> {
        self.client
            .put_unit("updateCustomer", &json!({ "id": customer_id }))
            .await
    }

    // =========================================================================
    // Payment & History
    // =========================================================================

    /// Finalizes the open cart into a transaction. Returns the receipt
    /// payload, or `None` when an identical payment was already in flight.
    pub async fn process_payment(
        &self,
        amount_received: Decimal,
    ) -> ClientResult<Option<TransactionRecord>> {
        self.client
            .post("processPayment", &json!({ "amountReceived": amount_received }))
            .await
    }

    /// One page of the branch's transaction history, newest first.
    pub async fn get_transaction_history(
        &self,
        branch_id: i64,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<TransactionSummary>> {
        let query = [
            ("branchId", branch_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        self.client.get_paged("getAllTransactions", &query).await
    }

    /// Headquarters-wide history, optionally scoped to one branch. Rows carry
    /// `branch_name`.
    pub async fn get_transaction_history_hq(
        &self,
        branch_id: Option<i64>,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<TransactionSummary>> {
        let mut query = vec![
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        if let Some(branch_id) = branch_id {
            query.push(("branchId", branch_id.to_string()));
        }
        self.client.get_paged("getAllTransactionsHQ", &query).await
    }

    /// Marks a transaction voided. Stock is restored server-side.
    pub async fn void_transaction(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("voidTransaction", &json!({ "id": id }))
            .await
    }

    /// Date of the branch's oldest transaction; `None` on a fresh branch.
    /// Used to bound the report date picker.
    pub async fn get_oldest_transaction(
        &self,
        branch_id: i64,
    ) -> ClientResult<Option<DateTime<Utc>>> {
        self.client
            .get_opt("getOldestTransaction", &[("branchId", branch_id.to_string())])
            .await
    }

    // =========================================================================
    // Loyalty Rewards
    // =========================================================================

    /// Records the item reward a customer picked for a completed loyalty
    /// stage.
    pub async fn save_customer_item_reward(
        &self,
        id: i64,
        item_id: i64,
        branch_id: i64,
        qty: Decimal,
    ) -> ClientResult<Option<()>> {
        self.client
            .put_unit(
                "saveCustomerItemReward",
                &json!({ "id": id, "itemId": item_id, "branchId": branch_id, "qty": qty }),
            )
            .await
    }

    /// Swaps a previously picked reward for a different item, returning the
    /// old pick's stock.
    #[allow(clippy::too_many_arguments)]
    pub async fn change_reward(
        &self,
        id: i64,
        item_id: i64,
        branch_id: i64,
        last_item_id: i64,
        qty: Decimal,
        last_qty: Decimal,
    ) -> ClientResult<Option<()>> {
        self.client
            .put_unit(
                "changeReward",
                &json!({
                    "id": id,
                    "itemId": item_id,
                    "branchId": branch_id,
                    "lastItemId": last_item_id,
                    "qty": qty,
                    "lastQty": last_qty,
                }),
            )
            .await
    }

    // =========================================================================
    // PDFs
    // =========================================================================

    /// Downloads the receipt PDF for a transaction and writes it as
    /// `{slip_no}_receipt.pdf` in the configured download directory.
    /// Returns the written path.
    pub async fn generate_receipt(
        &self,
        transaction_id: i64,
        slip_no: &str,
    ) -> ClientResult<PathBuf> {
        let bytes = self
            .client
            .download("generateReceipt", &json!({ "transactionId": transaction_id }))
            .await?;
        let path = self
            .download_dir()
            .join(format!("{}_receipt.pdf", slip_no));
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), "receipt written");
        Ok(path)
    }

    /// Downloads the sales report PDF for a date range and writes it under a
    /// collision-safe timestamped name. Returns the written path.
    pub async fn generate_sales_pdf(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        branch_id: i64,
    ) -> ClientResult<PathBuf> {
        let payload = json!({
            "fromDate": from.format("%Y-%m-%d").to_string(),
            "toDate": to.format("%Y-%m-%d").to_string(),
            "branchId": branch_id,
        });
        let bytes = self.client.download("generateSalespdf", &payload).await?;

        let timestamp = Utc::now().timestamp_millis();
        let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000);
        let path = self
            .download_dir()
            .join(format!("sales_{}_{}.pdf", timestamp, nonce));
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), "sales report written");
        Ok(path)
    }

    fn download_dir(&self) -> PathBuf {
        self.client
            .config()
            .download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
