use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

/// One row of the stock listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StockItem {
    pub offer_id: String,
    pub product_id: i64,
    pub stocks: Vec<WarehouseStock>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WarehouseStock {
    pub present: i64,
    pub reserved: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Default)]
pub struct ProductFilter {
    pub offer_id: Option<String>,
    pub product_id: Option<i64>,
    pub sku: Option<i64>,
}

#[derive(Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub code: u32,
    pub message: String,
}

/// Products are kept as raw JSON so the server returns exactly what the
/// fixture says, field for field.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub products: Vec<Value>,
    pub stocks: Vec<StockItem>,
}

pub const MAX_PAGE_SIZE: u32 = 1000;

impl Catalog {
    /// One fully populated product and 250 stock rows, enough for three
    /// pages of 100.
    pub fn demo() -> Self {
        let mut stocks = vec![StockItem {
            offer_id: "item_6060091".to_string(),
            product_id: 7154396,
            stocks: vec![WarehouseStock {
                present: 120,
                reserved: 0,
                kind: "fbo".to_string(),
            }],
        }];
        stocks.extend((1..250).map(|n| StockItem {
            offer_id: format!("item_{n:04}"),
            product_id: 1_000_000 + n,
            stocks: vec![
                WarehouseStock {
                    present: n % 7,
                    reserved: n % 3,
                    kind: "fbo".to_string(),
                },
                WarehouseStock {
                    present: n % 5,
                    reserved: 0,
                    kind: "fbs".to_string(),
                },
            ],
        }));

        Self {
            products: vec![demo_product()],
            stocks,
        }
    }

    fn find_product(&self, filter: &ProductFilter) -> Option<&Value> {
        self.products.iter().find(|p| {
            if let Some(offer_id) = filter.offer_id.as_deref().filter(|o| !o.is_empty()) {
                return p["offer_id"] == offer_id;
            }
            if let Some(id) = filter.product_id.filter(|id| *id != 0) {
                return p["id"] == id;
            }
            if let Some(sku) = filter.sku.filter(|sku| *sku != 0) {
                return p["sources"]
                    .as_array()
                    .is_some_and(|sources| sources.iter().any(|s| s["sku"] == sku));
            }
            false
        })
    }
}

fn demo_product() -> Value {
    json!({
        "barcode": "",
        "buybox_price": "",
        "category_id": 17034461,
        "created_at": "2019-11-26T10:40:44.940Z",
        "errors": [
            { "field": "string", "attribute_id": 0, "code": "string", "level": "string" }
        ],
        "id": 7154396,
        "images": ["https://cdn1.ozone.ru/multimedia/1028110514.jpg"],
        "marketing_price": "",
        "min_ozon_price": "3599.0000",
        "name": "Туалетная вода VALENTINO UOMO ACQUA spray 75 ml",
        "offer_id": "item_6060091",
        "old_price": "",
        "premium_price": "",
        "price": "3599.0000",
        "recommended_price": " ",
        "sources": [
            { "is_enabled": true, "sku": 150583609, "source": "fbo" }
        ],
        "state": "processed",
        "stocks": { "coming": 0, "present": 120, "reserved": 0 },
        "vat": "0.2",
        "visibility_details": { "active_product": true, "has_price": true, "has_stock": true },
        "visible": true
    })
}

type Rejection = (StatusCode, Json<ErrorBody>);

fn reject(status: StatusCode, code: u32, message: &str) -> Rejection {
    (
        status,
        Json(ErrorBody {
            code,
            message: message.to_string(),
        }),
    )
}

pub fn app(catalog: Catalog) -> Router {
    Router::new()
        .route("/v2/product/info", post(product_info))
        .route("/v2/product/info/stocks", post(product_stocks))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app(catalog)).await
}

/// Require a numeric `Client-Id` and a non-empty `Api-Key`.
fn authorize(headers: &HeaderMap) -> Result<i64, Rejection> {
    let client_id = headers
        .get("client-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok());
    let has_key = headers
        .get("api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());

    match client_id {
        Some(id) if has_key => Ok(id),
        _ => Err(reject(
            StatusCode::UNAUTHORIZED,
            16,
            "Client-Id and Api-Key headers are required",
        )),
    }
}

async fn product_info(
    State(catalog): State<Arc<Catalog>>,
    headers: HeaderMap,
    Json(filter): Json<ProductFilter>,
) -> Result<Json<Value>, Rejection> {
    let client_id = authorize(&headers)?;
    info!(client_id, offer_id = ?filter.offer_id, product_id = ?filter.product_id, sku = ?filter.sku, "product info");

    if filter.offer_id.as_deref().unwrap_or("").is_empty()
        && filter.product_id.unwrap_or(0) == 0
        && filter.sku.unwrap_or(0) == 0
    {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            3,
            "offer_id, product_id or sku is required",
        ));
    }

    catalog
        .find_product(&filter)
        .map(|p| Json(json!({ "result": p })))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, 5, "product not found"))
}

async fn product_stocks(
    State(catalog): State<Arc<Catalog>>,
    headers: HeaderMap,
    Json(pagination): Json<Pagination>,
) -> Result<Json<Value>, Rejection> {
    let client_id = authorize(&headers)?;
    info!(client_id, page = pagination.page, page_size = pagination.page_size, "product stocks");

    if pagination.page == 0 {
        return Err(reject(StatusCode::BAD_REQUEST, 3, "page starts at 1"));
    }
    if pagination.page_size == 0 || pagination.page_size > MAX_PAGE_SIZE {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            3,
            "page_size must be between 1 and 1000",
        ));
    }

    let size = pagination.page_size as usize;
    let skip = (pagination.page as usize - 1).saturating_mul(size);
    let items: Vec<&StockItem> = catalog.stocks.iter().skip(skip).take(size).collect();

    Ok(Json(json!({
        "result": { "items": items, "total": catalog.stocks.len() }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_spans_three_pages() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.stocks.len(), 250);
        assert_eq!(catalog.stocks[0].offer_id, "item_6060091");
        assert_eq!(catalog.products.len(), 1);
    }

    #[test]
    fn find_product_by_each_identifier() {
        let catalog = Catalog::demo();
        let by_offer = ProductFilter {
            offer_id: Some("item_6060091".to_string()),
            ..ProductFilter::default()
        };
        let by_id = ProductFilter {
            product_id: Some(7154396),
            ..ProductFilter::default()
        };
        let by_sku = ProductFilter {
            sku: Some(150583609),
            ..ProductFilter::default()
        };
        for filter in [by_offer, by_id, by_sku] {
            let product = catalog.find_product(&filter).unwrap();
            assert_eq!(product["price"], "3599.0000");
        }
    }

    #[test]
    fn find_product_misses_unknown_offer() {
        let catalog = Catalog::demo();
        let filter = ProductFilter {
            offer_id: Some("nope".to_string()),
            ..ProductFilter::default()
        };
        assert!(catalog.find_product(&filter).is_none());
    }

    #[test]
    fn warehouse_stock_uses_type_on_the_wire() {
        let stock = WarehouseStock {
            present: 1,
            reserved: 0,
            kind: "fbs".to_string(),
        };
        let json = serde_json::to_value(&stock).unwrap();
        assert_eq!(json["type"], "fbs");
    }

    #[test]
    fn pagination_rejects_missing_fields() {
        let result: Result<Pagination, _> = serde_json::from_str(r#"{"page":1}"#);
        assert!(result.is_err());
    }
}
