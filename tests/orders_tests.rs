//! Integration tests for the orders endpoints.
//!
//! Requests are sent to a mock StockX API and checked for path, query string
//! and credential headers.

use chrono::NaiveDate;
use serde_json::json;
use stockx_api::resources::{
    ActiveOrdersParams, HistoricalOrdersParams, InventoryType, OrderSortField, OrderStatus,
};
use stockx_api::{
    ApiKey, BaseUrl, ClientId, ClientSecret, HttpError, InvalidHttpRequestError, Session,
    StatusError, StockXClient, StockXConfig,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> StockXClient {
    let config = StockXConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .api_key(ApiKey::new("api-key").unwrap())
        .token_url(BaseUrl::new(format!("{}/oauth/token", server.uri())).unwrap())
        .api_base_url(BaseUrl::new(format!("{}/v2", server.uri())).unwrap())
        .build()
        .unwrap();
    StockXClient::with_session(config, Session::new("access-token", "refresh-token", 43200))
        .unwrap()
}

fn sample_order() -> serde_json::Value {
    json!({
        "askId": "14067894520712345",
        "orderNumber": "323314425-323214184",
        "listingId": "98e2e748-8000-45bf-a624-5531d6a68318",
        "amount": "180",
        "currencyCode": "USD",
        "createdAt": "2024-01-02T03:04:05.000Z",
        "updatedAt": "2024-01-02T03:04:05.000Z",
        "status": "AUTHENTICATED",
        "inventoryType": "STANDARD",
        "product": {"productId": "prod-1", "productName": "Jordan 1 Retro High"},
        "variant": {"variantId": "var-1", "variantName": "Jordan-1-10", "variantValue": "10"},
        "shipment": {"trackingNumber": "1Z999", "carrierCode": "UPS"},
        "payout": {
            "totalPayout": 160.5,
            "salePrice": 180,
            "totalAdjustments": -19.5,
            "currencyCode": "USD",
            "adjustments": [
                {"adjustmentType": "Transaction Fee", "amount": -16.2, "percentage": 0.09}
            ]
        }
    })
}

// ============================================================================
// Single order
// ============================================================================

#[tokio::test]
async fn test_get_order_sends_credentials_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/323314425-323214184"))
        .and(header("authorization", "Bearer access-token"))
        .and(header("x-api-key", "api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_order()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let order = client.get_order("323314425-323214184").await.unwrap();

    assert_eq!(order.order_number.as_deref(), Some("323314425-323214184"));
    assert_eq!(order.status.as_deref(), Some("AUTHENTICATED"));
    assert_eq!(order.inventory_type.as_deref(), Some("STANDARD"));
    assert_eq!(
        order.shipment.unwrap().tracking_number.as_deref(),
        Some("1Z999")
    );
    let payout = order.payout.unwrap();
    assert_eq!(payout.total_payout, Some(160.5));
    assert_eq!(payout.adjustments.len(), 1);
}

#[tokio::test]
async fn test_get_order_encodes_order_number() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let order = client.get_order("a/b c").await.unwrap();

    assert!(order.order_number.is_none());
}

#[tokio::test]
async fn test_get_order_empty_number_is_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.get_order("").await;

    assert!(matches!(
        result,
        Err(HttpError::InvalidRequest(
            InvalidHttpRequestError::EmptyPathSegment { name: "order_number" }
        ))
    ));
}

#[tokio::test]
async fn test_get_order_unauthorized_carries_body_and_reference() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/123"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("x-request-id", "req-42")
                .set_body_string(r#"{"message":"Unauthorized"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    match client.get_order("123").await {
        Err(HttpError::Response(error)) => {
            assert_eq!(error.status, StatusError::Unauthorized);
            assert_eq!(error.message, r#"{"message":"Unauthorized"}"#);
            assert_eq!(error.error_reference.as_deref(), Some("req-42"));
        }
        other => panic!("expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_order_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.get_order("123").await;

    assert!(matches!(result, Err(HttpError::Decode(_))));
}

// ============================================================================
// Active orders
// ============================================================================

#[tokio::test]
async fn test_get_active_orders_default_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/active"))
        .and(query_param("pageNumber", "1"))
        .and(query_param("pageSize", "20"))
        .and(query_param("sortOrder", "CREATEDAT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "pageSize": 20,
            "pageNumber": 1,
            "hasNextPage": false,
            "orders": [sample_order()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .get_active_orders(ActiveOrdersParams::default())
        .await
        .unwrap();

    assert_eq!(page.count, 1);
    assert!(!page.has_next_page);
    assert_eq!(page.orders.len(), 1);
}

#[tokio::test]
async fn test_get_active_orders_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/active"))
        .and(query_param("pageNumber", "3"))
        .and(query_param("pageSize", "100"))
        .and(query_param("orderStatus", "SHIPPED"))
        .and(query_param("productId", "prod-1"))
        .and(query_param("sortOrder", "SHIPBYDATE"))
        .and(query_param("inventoryTypes", "STANDARD,FLEX"))
        .and(query_param("initiatedShipmentDisplayIds", "S-1,S-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let params = ActiveOrdersParams {
        page_number: Some(3),
        page_size: Some(500),
        order_status: Some(OrderStatus::Shipped),
        product_id: Some("prod-1".to_string()),
        sort_order: Some(OrderSortField::ShipByDate),
        inventory_types: vec![InventoryType::Standard, InventoryType::Flex],
        initiated_shipment_display_ids: vec!["S-1".to_string(), "S-2".to_string()],
        ..ActiveOrdersParams::default()
    };
    let page = client.get_active_orders(params).await.unwrap();

    assert!(page.orders.is_empty());
}

// ============================================================================
// Historical orders
// ============================================================================

#[tokio::test]
async fn test_get_historical_orders_date_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/history"))
        .and(query_param("fromDate", "2024-01-01"))
        .and(query_param("toDate", "2024-03-31"))
        .and(query_param("orderStatus", "PAYOUTCOMPLETED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "hasNextPage": true,
            "orders": [sample_order(), sample_order()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let params = HistoricalOrdersParams {
        from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        to_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        order_status: Some(OrderStatus::PayoutCompleted),
        ..HistoricalOrdersParams::default()
    };
    let page = client.get_historical_orders(params).await.unwrap();

    assert_eq!(page.count, 2);
    assert!(page.has_next_page);
}

#[tokio::test]
async fn test_get_historical_orders_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/selling/orders/history"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let error = client
        .get_historical_orders(HistoricalOrdersParams::default())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(StatusError::Internal));
}
