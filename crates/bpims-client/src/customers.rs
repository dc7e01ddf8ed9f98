//! # Customer & Loyalty Endpoints
//!
//! Customer directory plus the loyalty program: cards, their stages, reward
//! items, and per-customer progress.
//!
//! Mutations are de-duplicated; `Ok(None)` means an identical call was
//! already in flight.

use chrono::Utc;
use serde_json::json;

use bpims_core::{
    Customer, CustomerLoyalty, LoyaltyCard, LoyaltyStage, ObjectRef, TransactionRecord,
};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Customer endpoint wrapper.
#[derive(Debug, Clone)]
pub struct CustomersApi {
    client: ApiClient,
}

impl CustomersApi {
    pub fn new(client: ApiClient) -> Self {
        CustomersApi { client }
    }

    // =========================================================================
    // Directory
    // =========================================================================

    /// Customers visible to a branch (all branches with `None`), filtered by
    /// search text.
    pub async fn get_customer_list(
        &self,
        branch_id: Option<i64>,
        search: &str,
    ) -> ClientResult<Vec<Customer>> {
        let mut query = vec![("search", search.to_string())];
        if let Some(branch_id) = branch_id {
            query.push(("branchid", branch_id.to_string()));
        }
        self.client.get("getCustomerList", &query).await
    }

    /// One customer by id.
    pub async fn get_customer(&self, id: i64) -> ClientResult<Customer> {
        self.client
            .get("getCustomer", &[("id", id.to_string())])
            .await
    }

    /// Full receipt payload for one past transaction, for the customer's
    /// purchase history view.
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

    /// Creates or updates a customer; returns the backend-issued id.
    pub async fn save_customer(&self, customer: &Customer) -> ClientResult<Option<i64>> {
        self.client
            .put("saveCustomer", &serde_json::to_value(customer)?)
            .await
    }

    /// Soft-deletes a customer.
    pub async fn delete_customer(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("deleteCustomer", &json!({ "id": id }))
            .await
    }

    /// URL of a customer's photo, with a cache-busting timestamp. The image
    /// widget fetches it directly; nothing is downloaded here.
    pub fn customer_image_url(&self, file_name: &str) -> String {
        format!(
            "{}?fileName={}&t={}",
            self.client.config().endpoint_url("getCustomerImage"),
            file_name,
            Utc::now().timestamp_millis()
        )
    }

    // =========================================================================
    // Loyalty
    // =========================================================================

    /// All loyalty card programs.
    pub async fn get_loyalty_card_list(&self) -> ClientResult<Vec<LoyaltyCard>> {
        self.client.get("getLoyaltyCardList", &[]).await
    }

    /// Stages of one loyalty card, in order.
    pub async fn get_loyalty_stages(&self, card_id: i64) -> ClientResult<Vec<LoyaltyStage>> {
        self.client
            .get("getLoyaltyStages", &[("cardId", card_id.to_string())])
            .await
    }

    /// Reward items stages can point at.
    pub async fn get_rewards(&self) -> ClientResult<Vec<ObjectRef>> {
        self.client.get("getRewards", &[]).await
    }

    /// A customer's progress across their loyalty cards.
    pub async fn get_customer_loyalty(
        &self,
        customer_id: i64,
    ) -> ClientResult<Vec<CustomerLoyalty>> {
        self.client
            .get("getCustomerLoyalty", &[("customerId", customer_id.to_string())])
            .await
    }

    /// Creates or renames a reward item.
    pub async fn save_reward(&self, id: i64, name: &str) -> ClientResult<Option<()>> {
        self.client
            .put_unit("saveItemsReward", &json!({ "id": id, "name": name }))
            .await
    }

    /// Creates or updates a loyalty card program.
    pub async fn save_loyalty_card(&self, card: &LoyaltyCard) -> ClientResult<Option<()>> {
        self.client
            .put_unit("saveLoyaltyCard", &json!({ "card": card }))
            .await
    }

    /// Creates or updates one stage of a card.
    pub async fn save_loyalty_stage(&self, stage: &LoyaltyStage) -> ClientResult<Option<()>> {
        self.client
            .put_unit("saveLoyaltyStage", &json!({ "stage": stage }))
            .await
    }

    /// Enrolls a customer into the active loyalty card.
    pub async fn save_loyalty_customer(&self, customer_id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("saveLoyaltyCustomer", &json!({ "customerId": customer_id }))
            .await
    }

    /// Marks the customer's current stage complete, recording the reward item
    /// handed out.
    pub async fn mark_stage_done(
        &self,
        loyalty_customer_id: i64,
        item_id: i64,
    ) -> ClientResult<Option<()>> {
        self.client
            .put_unit(
                "markStageDone",
                &json!({ "loyaltyCustomerId": loyalty_customer_id, "itemId": item_id }),
            )
            .await
    }

    /// Retires a loyalty card program.
    pub async fn delete_loyalty_card(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("deleteLoyaltyCard", &json!({ "id": id }))
            .await
    }

    /// Removes one stage from a card.
    pub async fn delete_stage(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("deleteStage", &json!({ "id": id }))
            .await
    }

    /// Removes a reward item.
    pub async fn delete_reward(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("deleteReward", &json!({ "id": id }))
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn customer_image_url_is_cache_busted() {
        let client = ApiClient::new(ClientConfig::new("https://pos.example.ph/api")).unwrap();
        let api = CustomersApi::new(client);

        let url = api.customer_image_url("maria.jpg");
        assert!(
            url.starts_with("https://pos.example.ph/api/getCustomerImage?fileName=maria.jpg&t=")
        );
        let (_, t) = url.rsplit_once("&t=").unwrap();
        assert!(t.parse::<i64>().is_ok());
    }
}
