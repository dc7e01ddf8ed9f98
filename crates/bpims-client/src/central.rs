//! # Central Sales Endpoints
//!
//! The warehouse-to-branch sales flow used at headquarters: central catalog,
//! central cart add, payment (cash or credit), and settlement of pending
//! credit transactions.
//!
//! Mutations are de-duplicated; `Ok(None)` means an identical call was
//! already in flight.

use rust_decimal::Decimal;
use serde_json::json;

use bpims_core::{BranchProduct, CentralItem, CentralTransactionSummary, TransactionRecord};

use crate::error::ClientResult;
use crate::http::{ApiClient, Paged};

/// Central sales endpoint wrapper.
#[derive(Debug, Clone)]
pub struct CentralApi {
    client: ApiClient,
}

impl CentralApi {
    pub fn new(client: ApiClient) -> Self {
        CentralApi { client }
    }

    /// One page of the central catalog with per-branch availability.
    pub async fn get_central_products(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<CentralItem>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        self.client.get_paged("getCentralProducts", &query).await
    }

    /// Adds branch allocations of an item to the central cart in one call.
    pub async fn add_central_item_to_cart(
        &self,
        branch_products: &[BranchProduct],
    ) -> ClientResult<Option<()>> {
        self.client
            .post_unit(
                "addCentralItemToCart",
                &json!({ "branchProducts": branch_products }),
            )
            .await
    }

    /// Finalizes the central cart. A credit sale records the transaction
    /// unpaid for later settlement.
    pub async fn process_central_payment(
        &self,
        amount_received: Decimal,
        is_credit: bool,
    ) -> ClientResult<Option<TransactionRecord>> {
        self.client
            .post(
                "processCentralPayment",
                &json!({ "amountReceived": amount_received, "isCredit": is_credit }),
            )
            .await
    }

    /// One page of central transaction history.
    pub async fn get_central_transaction_history(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<CentralTransactionSummary>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        self.client
            .get_paged("getAllCentralTransactions", &query)
            .await
    }

    /// Full receipt payload for one central transaction.
    pub async fn get_transaction_history(
        &self,
        transaction_id: i64,
    ) -> ClientResult<TransactionRecord> {
        self.client
            .get(
                "getTransactionHistory",
                &[("transactionId", transaction_id.to_string())],
            )
            .await
    }

    /// Applies a payment against an unpaid credit transaction.
    pub async fn pay_pending_transaction(
        &self,
        transaction_id: i64,
        amount: Decimal,
    ) -> ClientResult<Option<()>> {
        self.client
            .put_unit(
                "payPendingTransaction",
                &json!({ "transactionId": transaction_id, "amount": amount }),
            )
            .await
    }
}
