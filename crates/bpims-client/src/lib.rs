//! # BPIMS Client
//!
//! Async REST client for the BPIMS backend plus the [`SalesSession`]
//! checkout controller.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          bpims-client                                   │
//! │                                                                         │
//! │   SalesSession ──── owns ───► bpims_core::CartAggregator                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Endpoint wrappers                                                     │
//! │   SalesApi  CustomersApi  StocksApi  WarehouseApi  UsersApi             │
//! │   CentralApi  ItemsHqApi                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ApiClient (reqwest) ── CallResult envelope ── request de-duplication  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ClientConfig (TOML file + BPIMS_* env overrides)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every endpoint wrapper shares one [`ApiClient`]; cloning a wrapper or the
//! client is cheap and all clones share the same de-duplication state.
//!
//! ## Example
//! ```no_run
//! use bpims_client::{ApiClient, ClientConfig, SalesApi, SalesSession};
//!
//! # async fn run() -> Result<(), bpims_client::SessionError> {
//! let client = ApiClient::new(ClientConfig::new("http://localhost:8000"))?;
//! let mut session = SalesSession::new(SalesApi::new(client), 1);
//! session.hydrate().await?;
//! println!("due: {}", session.totals().total_amount);
//! # Ok(())
//! # }
//! ```

pub mod central;
pub mod config;
pub mod customers;
pub mod error;
pub mod http;
pub mod items_hq;
pub mod sales;
pub mod session;
pub mod stocks;
pub mod users;
pub mod warehouse;

pub use central::CentralApi;
pub use config::ClientConfig;
pub use customers::CustomersApi;
pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, CallResult, Paged};
pub use items_hq::ItemsHqApi;
pub use sales::SalesApi;
pub use session::{SalesSession, SessionError, SessionResult};
pub use stocks::StocksApi;
pub use users::UsersApi;
pub use warehouse::WarehouseApi;
