//! # Branch Stock Endpoints
//!
//! Branch-level inventory: stock listings, delivery and transfer history,
//! the cross-branch monitor, and stock mutations.
//!
//! Mutations are de-duplicated; `Ok(None)` means an identical call was
//! already in flight.

use rust_decimal::Decimal;
use serde_json::json;

use bpims_core::{BranchStock, ReturnToWarehouse, StockInput, StockMonitorRow, StockTransfer};

use crate::error::ClientResult;
use crate::http::{ApiClient, Paged};

/// Branch stock endpoint wrapper.
#[derive(Debug, Clone)]
pub struct StocksApi {
    client: ApiClient,
}

impl StocksApi {
    pub fn new(client: ApiClient) -> Self {
        StocksApi { client }
    }

    // =========================================================================
    // Listings & History
    // =========================================================================

    /// One page of a branch's stock levels, filtered by category and search
    /// text.
    pub async fn get_branch_stocks(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
        branch_id: i64,
    ) -> ClientResult<Paged<BranchStock>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
            ("branchId", branch_id.to_string()),
        ];
        self.client.get_paged("getBranchStocks", &query).await
    }

    /// Delivery history of one branch item, newest first.
    pub async fn get_stock_history(&self, branch_item_id: i64) -> ClientResult<Vec<StockInput>> {
        self.client
            .get("getStockHistory", &[("branchItemId", branch_item_id.to_string())])
            .await
    }

    /// Cross-branch stock monitor for headquarters: every item with its
    /// quantity at each branch and at the warehouse.
    pub async fn get_stocks_monitor(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<StockMonitorRow>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        self.client.get_paged("getStocksMonitor", &query).await
    }

    /// Outbound transfer history of one branch item.
    pub async fn get_branch_transfer_history(
        &self,
        branch_item_id: i64,
    ) -> ClientResult<Vec<StockTransfer>> {
        self.client
            .get(
                "getBranchTransferHistory",
                &[("branchItemId", branch_item_id.to_string())],
            )
            .await
    }

    /// Return-to-warehouse history of one branch item.
    pub async fn get_branch_return_history(
        &self,
        branch_item_id: i64,
    ) -> ClientResult<Vec<ReturnToWarehouse>> {
        self.client
            .get(
                "getBranchReturnHistory",
                &[("branchItemId", branch_item_id.to_string())],
            )
            .await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a stock delivery against a branch item.
    pub async fn create_stock_input(&self, stock_input: &StockInput) -> ClientResult<Option<()>> {
        self.client
            .post_unit("createStockInput", &json!({ "stockInput": stock_input }))
            .await
    }

    /// Overwrites the on-hand quantity of a branch item (manual correction).
    pub async fn edit_stock(&self, id: i64, qty: Decimal) -> ClientResult<Option<()>> {
        self.client
            .put_unit("editStock", &json!({ "id": id, "qty": qty }))
            .await
    }

    /// Moves stock from one branch to another.
    pub async fn save_transfer_stock(
        &self,
        branch_transfer: &StockTransfer,
    ) -> ClientResult<Option<()>> {
        self.client
            .post_unit("saveBranchTransfer", &json!({ "branchTransfer": branch_transfer }))
            .await
    }

    /// Sends stock from a branch back to the central warehouse.
    pub async fn return_to_warehouse(
        &self,
        return_stock: &ReturnToWarehouse,
    ) -> ClientResult<Option<()>> {
        self.client
            .post_unit("returnToWH", &json!({ "returnStock": return_stock }))
            .await
    }
}
