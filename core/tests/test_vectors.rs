//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use seller_core::{
    ApiError, ClientConfig, HttpResponse, MarketplaceClient, ProductInfo, ProductInfoFilter,
    StocksPage,
};

const BASE_URL: &str = "http://localhost:3000";

/// The build/parse halves never touch the transport.
fn client() -> MarketplaceClient<()> {
    let sandbox = ClientConfig::sandbox();
    MarketplaceClient::new(
        ClientConfig::new(BASE_URL, sandbox.client_id, sandbox.api_key),
        (),
    )
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        url: format!("{BASE_URL}/simulated"),
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn expected_headers(expected_req: &serde_json::Value) -> Vec<(String, String)> {
    expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Product info
// ---------------------------------------------------------------------------

#[test]
fn product_info_test_vectors() {
    let raw = include_str!("../../test-vectors/product_info.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: ProductInfoFilter = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_product_info(&input).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");
        let req_body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let info = c.parse_product_info(simulated(case)).unwrap();
        let expected: ProductInfo = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(info, expected, "{name}: parsed result");
    }
}

#[test]
fn product_info_fixture_keeps_price_strings() {
    let raw = include_str!("../../test-vectors/product_info.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let case = &vectors["cases"][0];

    let info = client().parse_product_info(simulated(case)).unwrap();
    assert_eq!(info.offer_id, "item_6060091");
    assert_eq!(info.price, "3599.0000");
    assert_eq!(info.buybox_price, "");
    assert_eq!(info.recommended_price, " ");
    assert_eq!(info.vat, "0.2");
    assert_eq!(info.created_at.to_rfc3339(), "2019-11-26T10:40:44.940+00:00");
    assert_eq!(info.errors.len(), 1);
    assert_eq!(info.sources[0].source, "fbo");
    assert_eq!(info.stocks.present, 120);
    assert!(info.visibility_details.active_product);
    assert!(info.visible);
}

// ---------------------------------------------------------------------------
// Stocks listing
// ---------------------------------------------------------------------------

#[test]
fn product_stocks_test_vectors() {
    let raw = include_str!("../../test-vectors/product_stocks.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let page = case["page"].as_u64().unwrap() as u32;
        let expected_req = &case["expected_request"];

        let req = c.build_product_stocks_page(page).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.header("Client-Id"), Some("836"), "{name}: client id");
        let req_body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        let parsed = c.parse_product_stocks_page(simulated(case)).unwrap();
        let expected: StocksPage = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(parsed, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let err = c.parse_product_stocks_page(simulated(case)).unwrap_err();
        match case["expected_error"].as_str().unwrap() {
            "decode" => assert!(matches!(err, ApiError::Decode { .. }), "{name}: got {err:?}"),
            "http_status" => {
                let expected = case["simulated_response"]["status"].as_u64().unwrap() as u16;
                assert!(
                    matches!(err, ApiError::HttpStatus { status, .. } if status == expected),
                    "{name}: got {err:?}"
                );
            }
            other => panic!("unknown expected_error: {other}"),
        }
    }
}
