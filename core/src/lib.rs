//! Synchronous client for a marketplace seller API.
//!
//! # Overview
//! Builds authenticated JSON POST requests, sends them through a pluggable
//! [`Transport`], and decodes the `{"result": ...}` envelopes into typed
//! values. Two operations are covered: a product lookup
//! (`/v2/product/info`) and the paginated stock listing
//! (`/v2/product/info/stocks`).
//!
//! # Design
//! - `MarketplaceClient` holds only its `ClientConfig` and a transport.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response); `fetch_*` runs both through the
//!   transport.
//! - Prices stay strings end to end.
//! - DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.
//!
//! ```no_run
//! use seller_core::{ClientConfig, MarketplaceClient, ProductInfoFilter, UreqTransport};
//!
//! let client = MarketplaceClient::new(ClientConfig::sandbox(), UreqTransport::new());
//! let info = client.fetch_product_info(&ProductInfoFilter::by_offer_id("item_6060091"))?;
//! println!("{} costs {}", info.name, info.price);
//!
//! let stocks = client.fetch_all_product_stocks().map_err(|e| e.into_error())?;
//! println!("{} stock entries", stocks.len());
//! # Ok::<(), seller_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pagination;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;

pub use client::{MarketplaceClient, PRODUCT_INFO_PATH, PRODUCT_STOCKS_PATH, STOCKS_PAGE_SIZE};
pub use config::{ClientConfig, PRODUCTION_HOST, SANDBOX_HOST};
pub use error::{ApiError, PartialFetch, TransportError};
pub use http::{HttpRequest, HttpResponse, RawResponse, Transport};
pub use pagination::{ProductStocks, TotalPolicy};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    Envelope, Pagination, ProductError, ProductInfo, ProductInfoFilter, ProductInfoStock,
    ProductInfoStocks, ProductSource, Stocks, StocksPage, VisibilityDetails,
};
