//! # Headquarters Item Endpoints
//!
//! Catalog administration from headquarters: the HQ-wide product listing,
//! item create/update/delete, and item image URLs.
//!
//! Item images are fetched straight from a URL by the image widget, so
//! [`item_image_url`](ItemsHqApi::item_image_url) builds the address
//! instead of downloading; a timestamp query defeats stale image caches
//! after an upload.
//!
//! Mutations are de-duplicated; `Ok(None)` means an identical call was
//! already in flight.

use chrono::Utc;
use serde_json::json;

use bpims_core::{Category, HqItem};

use crate::error::ClientResult;
use crate::http::{ApiClient, Paged};

/// Headquarters item endpoint wrapper.
#[derive(Debug, Clone)]
pub struct ItemsHqApi {
    client: ApiClient,
}

impl ItemsHqApi {
    pub fn new(client: ApiClient) -> Self {
        ItemsHqApi { client }
    }

    /// One page of the HQ-wide catalog, filtered by category and search
    /// text.
    pub async fn get_products_hq(
        &self,
        category_id: i64,
        page: i64,
        search: &str,
    ) -> ClientResult<Paged<HqItem>> {
        let query = [
            ("categoryId", category_id.to_string()),
            ("page", page.to_string()),
            ("search", search.to_string()),
        ];
        self.client.get_paged("getProductsHQ", &query).await
    }

    /// All product categories as headquarters sees them.
    pub async fn get_categories_hq(&self) -> ClientResult<Vec<Category>> {
        self.client.get("getCategoriesHQ", &[]).await
    }

    /// One catalog item with its full HQ metadata.
    pub async fn get_product_hq(&self, id: i64) -> ClientResult<HqItem> {
        self.client
            .get("getProductHQ", &[("id", id.to_string())])
            .await
    }

    /// Creates or updates a catalog item; returns the backend-issued id.
    pub async fn save_item(&self, item: &HqItem) -> ClientResult<Option<i64>> {
        self.client
            .put("saveItem", &serde_json::to_value(item)?)
            .await
    }

    /// Soft-deletes a catalog item.
    pub async fn delete_item(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("deleteItem", &json!({ "id": id }))
            .await
    }

    /// URL of an item's image, with a cache-busting timestamp.
    pub fn item_image_url(&self, file_name: &str) -> String {
        format!(
            "{}?fileName={}&t={}",
            self.client.config().endpoint_url("getItemImage"),
            file_name,
            Utc::now().timestamp_millis()
        )
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
    fn item_image_url_is_cache_busted() {
        let client = ApiClient::new(ClientConfig::new("https://pos.example.ph/api")).unwrap();
        let api = ItemsHqApi::new(client);

        let url = api.item_image_url("coke.png");
        assert!(url.starts_with("https://pos.example.ph/api/getItemImage?fileName=coke.png&t="));

        let (_, t) = url.rsplit_once("&t=").unwrap();
        assert!(t.parse::<i64>().is_ok());
    }
}
