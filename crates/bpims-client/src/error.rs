//! # Client Error Type
//!
//! Unified error type for the REST service layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Client                             │
//! │                                                                         │
//! │  Screen calls SalesApi::process_payment()                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Transport failure? ──── reqwest::Error ──────────► ClientError::Http  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Non-2xx status? ──────── status + body ──────────► ClientError::Api   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  isSuccess == false? ──── envelope message ───────► ClientError::      │
//! │         │                                            Rejected          │
//! │         ▼                                                               │
//! │  Body not decodable? ───────────────────────────────► ClientError::    │
//! │         │                                              Decode          │
//! │         ▼                                                               │
//! │  Success ─────────────────────────────────────────► Ok(data)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business rule failures (stock, quantity) never appear here; those are
//! `bpims_core::CoreError` and are raised before any request is sent.

use thiserror::Error;

/// Errors raised by the REST service layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend envelope reported a failed call (`isSuccess: false`).
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A successful envelope arrived without the expected `data` payload.
    #[error("Response for {endpoint} carried no data")]
    MissingData { endpoint: String },

    /// Configuration is missing or invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing a downloaded file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = ClientError::Api {
            status: 404,
            message: "Transaction not found!".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Transaction not found!");

        let err = ClientError::Rejected("Insufficient stock".to_string());
        assert_eq!(err.to_string(), "Request rejected: Insufficient stock");
    }
}
