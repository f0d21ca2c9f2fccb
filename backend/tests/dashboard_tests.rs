mod common;

use axum::http::StatusCode;
use common::*;
use stockbot_backend::{
    llm::{mock::MockLlmClient, LlmReply},
    stock::mock::MockStockClient,
};

#[tokio::test]
async fn test_dashboard_sorted_by_gain() {
    let setup = TestSetup::with_service(sample_service());

    let response = setup.send_get_request("/api/v1/dashboard").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = setup.parse_response_body(response).await.unwrap();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 4);

    let names: Vec<&str> = rows
        .iter()
        .map(|row| row["acrynomNameAr"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["STC", "ARAMCO", "SABIC", "RAJHI"]);

    let first = &rows[0];
    assert_eq!(first["companyID"], 3);
    assert_eq!(first["argaamID"], "argaam-3");
    assert_eq!(first["percentageGained"], 2.4);
    assert_eq!(body["message"], "Dashboard data retrieved successfully");
}

#[tokio::test]
async fn test_dashboard_provider_unavailable() {
    let setup = TestSetup::with_service(stock_chat_service(
        MockLlmClient::replying(LlmReply::text("unused")),
        MockStockClient::with_sample_data().unavailable(),
    ));

    let response = setup.send_get_request("/api/v1/dashboard").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = setup.parse_response_body(response).await.unwrap();
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_chart_by_tadawul_id() {
    let setup = TestSetup::with_service(sample_service());

    let response = setup
        .send_get_request("/api/v1/dashboard/chart?tadawulId=2222")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = setup.parse_response_body(response).await.unwrap();
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["date"], "2025-03-01");
    assert_eq!(points[0]["x"], 0);
    assert_eq!(points[2]["x"], 2);
    assert_eq!(points[2]["y"], points[2]["close"]);
}

#[tokio::test]
async fn test_chart_by_company_id_with_days() {
    let setup = TestSetup::with_service(sample_service());

    let response = setup
        .send_get_request("/api/v1/dashboard/chart?companyId=4&days=1")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = setup.parse_response_body(response).await.unwrap();
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["date"], "2025-03-03");
}

#[tokio::test]
async fn test_chart_requires_identifier() {
    let setup = TestSetup::with_service(sample_service());

    let response = setup.send_get_request("/api/v1/dashboard/chart").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = setup.parse_response_body(response).await.unwrap();
    assert!(body["data"].is_null());
    assert_eq!(
        body["message"],
        "Either companyId or tadawulId must be provided"
    );
}

#[tokio::test]
async fn test_chart_unknown_company() {
    let setup = TestSetup::with_service(sample_service());

    let response = setup
        .send_get_request("/api/v1/dashboard/chart?tadawulId=9999")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chart_rejects_malformed_query() {
    let setup = TestSetup::with_service(sample_service());

    let response = setup
        .send_get_request("/api/v1/dashboard/chart?companyId=abc")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = setup.parse_response_body(response).await.unwrap();
    assert_eq!(body["message"], "Invalid query parameters");
}
