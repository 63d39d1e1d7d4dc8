//! Request builder, response decoder and the `MarketplaceClient` operations.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`;
//! neither touches the network. The `fetch_*` methods glue the two halves
//! together through the client's [`Transport`]. Callers that run their own
//! I/O can use the halves directly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, PartialFetch};
use crate::http::{read_response, HttpRequest, HttpResponse, Transport};
use crate::pagination::{ProductStocks, TotalPolicy};
use crate::types::{Envelope, Pagination, ProductInfo, ProductInfoFilter, ProductInfoStock, StocksPage};

pub const PRODUCT_INFO_PATH: &str = "/v2/product/info";
pub const PRODUCT_STOCKS_PATH: &str = "/v2/product/info/stocks";
pub const STOCKS_PAGE_SIZE: u32 = 100;

/// Synchronous client for the seller API.
///
/// Holds the configuration and a transport handle and nothing else, so one
/// client can serve any number of calls. Every call blocks until its
/// round-trips complete; deadlines belong to the transport.
#[derive(Debug, Clone)]
pub struct MarketplaceClient<T> {
    config: ClientConfig,
    transport: T,
    total_policy: TotalPolicy,
}

impl<T> MarketplaceClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            total_policy: TotalPolicy::default(),
        }
    }

    /// Choose how the listing total is tracked across pages.
    pub fn with_total_policy(mut self, policy: TotalPolicy) -> Self {
        self.total_policy = policy;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn total_policy(&self) -> TotalPolicy {
        self.total_policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build an authenticated JSON POST to `host + path`.
    pub fn build_post<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(ApiError::Serialization)?;

        let url = format!("{}{path}", self.config.base_url());
        if let Err(e) = url::Url::parse(&url) {
            return Err(ApiError::RequestConstruction { url, source: e });
        }

        Ok(HttpRequest {
            url,
            headers: vec![
                ("Client-Id".to_string(), self.config.client_id.to_string()),
                ("Api-Key".to_string(), self.config.api_key.clone()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        })
    }

    pub fn build_product_info(&self, filter: &ProductInfoFilter) -> Result<HttpRequest, ApiError> {
        self.build_post(PRODUCT_INFO_PATH, filter)
    }

    pub fn build_product_stocks_page(&self, page: u32) -> Result<HttpRequest, ApiError> {
        self.build_post(
            PRODUCT_STOCKS_PATH,
            &Pagination {
                page,
                page_size: STOCKS_PAGE_SIZE,
            },
        )
    }

    pub fn parse_product_info(&self, response: HttpResponse) -> Result<ProductInfo, ApiError> {
        decode(response, PRODUCT_INFO_PATH)
    }

    pub fn parse_product_stocks_page(&self, response: HttpResponse) -> Result<StocksPage, ApiError> {
        decode(response, PRODUCT_STOCKS_PATH)
    }
}

impl<T: Transport> MarketplaceClient<T> {
    /// Send `request` and read the whole response body.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(url = %request.url, bytes = request.body.len(), "sending request");

        let raw = self
            .transport
            .send(request)
            .map_err(|e| ApiError::Transport {
                url: request.url.clone(),
                source: e,
            })?;
        let response = read_response(raw, &request.url)?;

        debug!(
            url = %request.url,
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        Ok(response)
    }

    /// Look up a single product.
    pub fn fetch_product_info(&self, filter: &ProductInfoFilter) -> Result<ProductInfo, ApiError> {
        let request = self.build_product_info(filter)?;
        let response = self.send(&request)?;
        self.parse_product_info(response)
    }

    /// Fetch one page of the stock listing, `page` being 1-based.
    pub fn fetch_product_stocks_page(&self, page: u32) -> Result<StocksPage, ApiError> {
        let request = self.build_product_stocks_page(page)?;
        let response = self.send(&request)?;
        self.parse_product_stocks_page(response)
    }

    /// Lazily walk the stock listing from page 1.
    pub fn product_stocks(&self) -> ProductStocks<'_, T> {
        ProductStocks::new(self, self.total_policy)
    }

    /// Drain the stock listing into one collection, in page order.
    ///
    /// On failure the items received before the failing page are returned
    /// inside the error.
    pub fn fetch_all_product_stocks(
        &self,
    ) -> Result<Vec<ProductInfoStock>, PartialFetch<ProductInfoStock>> {
        let mut items = Vec::new();
        for item in self.product_stocks() {
            match item {
                Ok(item) => items.push(item),
                Err(error) => return Err(PartialFetch { items, error }),
            }
        }
        Ok(items)
    }
}

/// Reject non-2xx statuses, then unwrap the `{"result": ...}` envelope.
fn decode<R: DeserializeOwned>(response: HttpResponse, context: &str) -> Result<R, ApiError> {
    check_status(&response)?;
    let envelope: Envelope<R> =
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
            context: context.to_string(),
            source: e,
        })?;
    Ok(envelope.result)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        url: response.url.clone(),
        status: response.status,
        body: response.text(),
    })
}
