//! # Warehouse Endpoints
//!
//! Central warehouse inventory: stock listings and history, supplier
//! directory, supplier deliveries, and returns to suppliers.
//!
//! Mutations are de-duplicated; `Ok(None)` means an identical call was
//! already in flight.

use rust_decimal::Decimal;
use serde_json::json;

use bpims_core::{
    ObjectRef, ReturnToSupplier, StockMonitorRow, Supplier, WarehouseStock, WarehouseStockInput,
};

use crate::error::ClientResult;
use crate::http::{ApiClient, Paged};

/// Warehouse endpoint wrapper.
#[derive(Debug, Clone)]
pub struct WarehouseApi {
    client: ApiClient,
}

impl WarehouseApi {
    pub fn new(client: ApiClient) -> Self {
        WarehouseApi { client }
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// One page of warehouse stock levels, filtered by category and search
    /// text.
    pub async fn get_wh_stocks(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<WarehouseStock>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        self.client.get_paged("getWHStocks", &query).await
    }

    /// Delivery history of one warehouse item, newest first.
    pub async fn get_wh_stock_history(
        &self,
        item_id: i64,
    ) -> ClientResult<Vec<WarehouseStockInput>> {
        self.client
            .get("getWHStockHistory", &[("itemId", item_id.to_string())])
            .await
    }

    /// All deliveries received from one supplier.
    pub async fn get_supplier_stock_history(
        &self,
        supplier_id: i64,
    ) -> ClientResult<Vec<WarehouseStockInput>> {
        self.client
            .get(
                "getSupplierStockHistory",
                &[("supplierId", supplier_id.to_string())],
            )
            .await
    }

    /// Records a supplier delivery into the warehouse.
    pub async fn create_wh_stock_input(
        &self,
        stock_input: &WarehouseStockInput,
    ) -> ClientResult<Option<()>> {
        self.client
            .post_unit("createWHStockInput", &json!({ "stockInput": stock_input }))
            .await
    }

    /// Warehouse-side stock monitor: every item with its warehouse quantity
    /// and per-branch breakdown, same row shape as the branch monitor.
    pub async fn get_wh_stocks_monitor(
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
        self.client.get_paged("getWHStocksMonitor", &query).await
    }

    /// Overwrites the on-hand quantity of a warehouse item (manual
    /// correction).
    pub async fn edit_wh_stock(&self, id: i64, qty: Decimal) -> ClientResult<Option<()>> {
        self.client
            .put_unit("editWHStock", &json!({ "id": id, "qty": qty }))
            .await
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    /// Supplier dropdown entries matching the search text.
    pub async fn get_supplier_list(&self, search: &str) -> ClientResult<Vec<ObjectRef>> {
        self.client
            .get("getSupplierList", &[("search", search.to_string())])
            .await
    }

    /// One supplier by id.
    pub async fn get_supplier(&self, id: i64) -> ClientResult<Supplier> {
        self.client
            .get("getSupplier", &[("id", id.to_string())])
            .await
    }

    /// Creates or updates a supplier.
    pub async fn save_supplier(&self, supplier: &Supplier) -> ClientResult<Option<()>> {
        self.client
            .post_unit("saveSupplier", &json!({ "supplier": supplier }))
            .await
    }

    /// Soft-deletes a supplier.
    pub async fn remove_supplier(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .post_unit("removeSupplier", &json!({ "id": id }))
            .await
    }

    // =========================================================================
    // Returns
    // =========================================================================

    /// Return-to-supplier history of one warehouse item.
    pub async fn get_return_to_stock_history(
        &self,
        wh_item_id: i64,
    ) -> ClientResult<Vec<ReturnToSupplier>> {
        self.client
            .get(
                "getReturnToStockHistory",
                &[("whItemId", wh_item_id.to_string())],
            )
            .await
    }

    /// Sends warehouse stock back to its supplier.
    pub async fn return_to_supplier(
        &self,
        return_stock: &ReturnToSupplier,
    ) -> ClientResult<Option<()>> {
        self.client
            .post_unit("returnToSupplier", &json!({ "returnStock": return_stock }))
            .await
    }
}
