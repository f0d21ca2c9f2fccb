use std::time::Duration;

use serde_json::json;
use stockbot_backend::{
    stock::{HttpStockClient, StockClient, StockError},
    types::StockApiConfig,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, api_key: Option<&str>, timeout: Duration) -> HttpStockClient {
    HttpStockClient::new(&StockApiConfig {
        base_url: server.uri(),
        api_key: api_key.map(ToString::to_string),
        timeout,
    })
    .unwrap()
}

#[tokio::test]
async fn test_companies_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .and(header("X-API-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "tadawulID": "2222",
            "companyID": 1,
            "argaamID": "14",
            "companyName": "Saudi Arabian Oil Co.",
            "companyNameAr": "أرامكو السعودية",
            "acrynomName": "ARAMCO",
            "acrynomNameAr": "أرامكو",
            "sector": "Energy",
            "sectorAr": "الطاقة",
            "price": 27.45,
            "change": 0.33,
            "changePercent": 1.2
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let companies = client(&server, Some("secret"), Duration::from_secs(5))
        .companies()
        .await
        .unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].tadawul_id, "2222");
    assert_eq!(companies[0].acrynom_name_ar, "أرامكو");
}

#[tokio::test]
async fn test_price_history_passes_days() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies/7/prices"))
        .and(query_param("days", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2025-03-02", "open": 10.0, "high": 11.0, "low": 9.5, "close": 10.5, "volume": 1200.0 },
            { "date": "2025-03-01", "open": 9.8, "high": 10.2, "low": 9.6, "close": 10.0, "volume": 900.0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client(&server, None, Duration::from_secs(5))
        .price_history(7, 90)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-03-02");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server, None, Duration::from_secs(5))
        .companies()
        .await
        .unwrap_err();

    match err {
        StockError::Http { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = client(&server, None, Duration::from_secs(5))
        .companies()
        .await
        .unwrap_err();

    assert!(matches!(err, StockError::Decode(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client(&server, None, Duration::from_millis(100))
        .companies()
        .await
        .unwrap_err();

    assert!(matches!(err, StockError::Timeout));
}
