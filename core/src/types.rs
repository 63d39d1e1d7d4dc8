//! Domain DTOs for the seller API.
//!
//! # Design
//! These types mirror the remote API's JSON but are defined independently
//! from the mock-server crate; integration tests catch schema drift.
//!
//! Prices are kept as the strings the API sends. The API uses strings to
//! avoid float rounding and sends `""` for an unset price, so nothing here
//! parses them. The remote side omits fields freely, so every record
//! decodes missing fields to their zero value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `{ "result": ... }` wrapper around every API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub result: T,
}

/// Snapshot of one catalog item returned by `/v2/product/info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfo {
    pub id: i64,
    pub offer_id: String,
    pub barcode: String,
    pub category_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub images: Vec<String>,
    pub state: String,
    pub vat: String,
    pub visible: bool,

    pub buybox_price: String,
    pub marketing_price: String,
    pub min_ozon_price: String,
    pub old_price: String,
    pub premium_price: String,
    pub price: String,
    pub recommended_price: String,

    pub errors: Vec<ProductError>,
    pub sources: Vec<ProductSource>,
    pub stocks: Stocks,
    pub visibility_details: VisibilityDetails,
}

/// A validation problem the marketplace attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductError {
    pub field: String,
    pub attribute_id: i64,
    pub code: String,
    pub level: String,
}

/// Per-channel SKU availability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSource {
    pub is_enabled: bool,
    pub sku: i64,
    pub source: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stocks {
    pub coming: i64,
    pub present: i64,
    pub reserved: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityDetails {
    pub active_product: bool,
    pub has_price: bool,
    pub has_stock: bool,
}

/// Lookup criteria for `/v2/product/info`. Set whichever identifier you
/// have; unset fields are left out of the request body and the remote
/// service decides whether the combination is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfoFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<i64>,
}

impl ProductInfoFilter {
    pub fn by_offer_id(offer_id: impl Into<String>) -> Self {
        Self {
            offer_id: Some(offer_id.into()),
            ..Self::default()
        }
    }

    pub fn by_product_id(product_id: i64) -> Self {
        Self {
            product_id: Some(product_id),
            ..Self::default()
        }
    }

    pub fn by_sku(sku: i64) -> Self {
        Self {
            sku: Some(sku),
            ..Self::default()
        }
    }
}

/// One item of the `/v2/product/info/stocks` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfoStock {
    pub offer_id: String,
    pub product_id: i64,
    pub stocks: Vec<ProductInfoStocks>,
}

/// Stock held in one kind of warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfoStocks {
    pub present: i64,
    pub reserved: i64,
    /// Warehouse type tag, e.g. `"fbo"` or `"fbs"`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request body for a listing page. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

/// The `result` of one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StocksPage {
    pub items: Vec<ProductInfoStock>,
    pub total: u64,
}
