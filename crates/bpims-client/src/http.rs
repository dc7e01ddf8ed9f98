//! # HTTP Layer
//!
//! The shared REST plumbing every endpoint wrapper goes through.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Request Pipeline                                  │
//! │                                                                         │
//! │  Wrapper (sales.rs, stocks.rs, ...)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Mutation? ──► RequestTracker.begin("endpoint:{json}")                 │
//! │       │          │                                                      │
//! │       │          └── already in flight ──► skipped, Ok(None)           │
//! │       ▼                                                                 │
//! │  reqwest GET/POST/PUT ──► non-2xx ──► ClientError::Api                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CallResult envelope { isSuccess, message, data, totalCount }          │
//! │       │                                                                 │
//! │       ├── isSuccess == false ──► ClientError::Rejected                 │
//! │       └── data ─────────────────► Ok(T) / Ok(Paged<T>)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## De-duplication
//! The backend is not idempotent for mutations, and POS operators double-tap.
//! Every mutating call is keyed by `endpoint:{json payload}`; while one is in
//! flight an identical call is skipped and reported as `Ok(None)`. The key is
//! released when the first call settles, success or error.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// CallResult Envelope
// =============================================================================

/// The backend's uniform response envelope.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult<T> {
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Total row count for paged listings.
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// A page of rows plus the backend's total row count.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub rows: Vec<T>,
    pub total_count: i64,
}

// =============================================================================
// Request De-duplication
// =============================================================================

/// Builds the de-duplication key for a mutating request.
pub(crate) fn request_key(endpoint: &str, payload: &Value) -> String {
    format!("{}:{}", endpoint, payload)
}

/// Tracks mutating requests currently in flight.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestTracker {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl RequestTracker {
    /// Claims a key. Returns `None` when an identical request is already in
    /// flight; otherwise returns a guard that releases the key on drop.
    pub(crate) fn begin(&self, key: String) -> Option<InFlightGuard> {
        let mut set = self.in_flight.lock().expect("request tracker poisoned");
        if !set.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            key,
        })
    }
}

/// RAII guard for one in-flight mutation key.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        // Release even on error paths so a failed call can be retried.
        self.set
            .lock()
            .expect("request tracker poisoned")
            .remove(&self.key);
    }
}

// =============================================================================
// API Client
// =============================================================================

/// The shared HTTP client every endpoint wrapper is built on.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    tracker: RequestTracker,
}

impl ApiClient {
    /// Creates a client from the given configuration.
    ///
    /// ## Errors
    /// Returns [`ClientError::Config`] for invalid configuration and
    /// [`ClientError::Http`] if the underlying client fails to build.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(ApiClient {
            http,
            config,
            tracker: RequestTracker::default(),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // GET
    // =========================================================================

    /// GET with query parameters; unwraps the envelope and requires `data`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        debug!(endpoint, "GET");
        let response = self
            .http
            .get(self.config.endpoint_url(endpoint))
            .query(query)
            .send()
            .await?;
        let envelope = Self::decode::<T>(response).await?;
        Self::require_data(envelope, endpoint)
    }

    /// GET where a `null` or absent `data` is meaningful (for example the
    /// oldest-transaction probe on an empty branch).
    pub async fn get_opt<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Option<T>> {
        debug!(endpoint, "GET");
        let response = self
            .http
            .get(self.config.endpoint_url(endpoint))
            .query(query)
            .send()
            .await?;
        let envelope = Self::decode::<T>(response).await?;
        Ok(envelope.data)
    }

    /// GET for paged listings; rows plus the envelope's `totalCount`.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Paged<T>> {
        debug!(endpoint, "GET (paged)");
        let response = self
            .http
            .get(self.config.endpoint_url(endpoint))
            .query(query)
            .send()
            .await?;
        let envelope = Self::decode::<Vec<T>>(response).await?;
        let total_count = envelope.total_count.unwrap_or(0);
        let rows = Self::require_data(envelope, endpoint)?;
        Ok(Paged { rows, total_count })
    }

    /// GET for the few endpoints that answer with a bare body instead of the
    /// `CallResult` envelope (branch and department dropdowns).
    pub async fn get_raw<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        debug!(endpoint, "GET (raw)");
        let response = self
            .http
            .get(self.config.endpoint_url(endpoint))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    // =========================================================================
    // Mutations (de-duplicated)
    // =========================================================================

    /// De-duplicated POST returning the envelope's `data`.
    ///
    /// `Ok(None)` means an identical request was already in flight and this
    /// one was skipped.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> ClientResult<Option<T>> {
        let Some(_guard) = self.tracker.begin(request_key(endpoint, payload)) else {
            debug!(endpoint, "duplicate in-flight POST skipped");
            return Ok(None);
        };
        debug!(endpoint, "POST");
        let response = self
            .http
            .post(self.config.endpoint_url(endpoint))
            .json(payload)
            .send()
            .await?;
        let envelope = Self::decode::<T>(response).await?;
        Self::require_data(envelope, endpoint).map(Some)
    }

    /// De-duplicated POST for endpoints whose `data` payload is irrelevant.
    pub async fn post_unit(&self, endpoint: &str, payload: &Value) -> ClientResult<Option<()>> {
        let Some(_guard) = self.tracker.begin(request_key(endpoint, payload)) else {
            debug!(endpoint, "duplicate in-flight POST skipped");
            return Ok(None);
        };
        debug!(endpoint, "POST");
        let response = self
            .http
            .post(self.config.endpoint_url(endpoint))
            .json(payload)
            .send()
            .await?;
        Self::decode::<Value>(response).await?;
        Ok(Some(()))
    }

    /// De-duplicated PUT returning the envelope's `data`.
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> ClientResult<Option<T>> {
        let Some(_guard) = self.tracker.begin(request_key(endpoint, payload)) else {
            debug!(endpoint, "duplicate in-flight PUT skipped");
            return Ok(None);
        };
        debug!(endpoint, "PUT");
        let response = self
            .http
            .put(self.config.endpoint_url(endpoint))
            .json(payload)
            .send()
            .await?;
        let envelope = Self::decode::<T>(response).await?;
        Self::require_data(envelope, endpoint).map(Some)
    }

    /// De-duplicated PUT for endpoints whose `data` payload is irrelevant.
    pub async fn put_unit(&self, endpoint: &str, payload: &Value) -> ClientResult<Option<()>> {
        let Some(_guard) = self.tracker.begin(request_key(endpoint, payload)) else {
            debug!(endpoint, "duplicate in-flight PUT skipped");
            return Ok(None);
        };
        debug!(endpoint, "PUT");
        let response = self
            .http
            .put(self.config.endpoint_url(endpoint))
            .json(payload)
            .send()
            .await?;
        Self::decode::<Value>(response).await?;
        Ok(Some(()))
    }

    // =========================================================================
    // Binary Downloads
    // =========================================================================

    /// POST that returns raw bytes (receipt / report PDFs). Not wrapped in
    /// the envelope and not de-duplicated; downloads are read-only.
    pub async fn download(&self, endpoint: &str, payload: &Value) -> ClientResult<Vec<u8>> {
        debug!(endpoint, "POST (download)");
        let response = self
            .http
            .post(self.config.endpoint_url(endpoint))
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    // =========================================================================
    // Envelope Handling
    // =========================================================================

    /// Checks the HTTP status, then decodes and checks the envelope.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<CallResult<T>> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CallResult<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !envelope.is_success {
            let message = envelope
                .message
                .unwrap_or_else(|| "request failed".to_string());
            warn!(%message, "backend rejected request");
            return Err(ClientError::Rejected(message));
        }
        Ok(envelope)
    }

    fn require_data<T>(envelope: CallResult<T>, endpoint: &str) -> ClientResult<T> {
        envelope.data.ok_or_else(|| ClientError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_decodes_success_with_total_count() {
        let json = r#"{
            "isSuccess": true,
            "message": "Successfully Retrieved",
            "data": [1, 2, 3],
            "totalCount": 42
        }"#;
        let envelope: CallResult<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success);
        assert_eq!(envelope.data.unwrap(), vec![1, 2, 3]);
        assert_eq!(envelope.total_count, Some(42));
    }

    #[test]
    fn envelope_tolerates_missing_optional_fields() {
        let json = r#"{"isSuccess": true}"#;
        let envelope: CallResult<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success);
        assert!(envelope.data.is_none());
        assert!(envelope.message.is_none());
    }

    #[test]
    fn request_key_is_stable_for_identical_payloads() {
        let a = request_key("addItemToCart", &json!({"itemId": 1, "quantity": 2}));
        let b = request_key("addItemToCart", &json!({"itemId": 1, "quantity": 2}));
        let c = request_key("addItemToCart", &json!({"itemId": 1, "quantity": 3}));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn tracker_blocks_duplicates_until_guard_drops() {
        let tracker = RequestTracker::default();
        let key = request_key("voidTransaction", &json!({"id": 5}));

        let guard = tracker.begin(key.clone());
        assert!(guard.is_some());
        // Identical call while in flight is rejected.
        assert!(tracker.begin(key.clone()).is_none());
        // A different payload is unrelated.
        assert!(tracker
            .begin(request_key("voidTransaction", &json!({"id": 6})))
            .is_some());

        drop(guard);
        // Key released, the call may be issued again.
        assert!(tracker.begin(key).is_some());
    }

    #[test]
    fn client_rejects_invalid_config() {
        let config = ClientConfig::new("not-a-url");
        assert!(matches!(
            ApiClient::new(config),
            Err(ClientError::Config(_))
        ));
    }
}
