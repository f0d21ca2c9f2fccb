use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use stockbot_backend::{
    llm::{ChartKind, ChartStocks, ChatMessage, LlmClient, LlmError, OpenAiClient},
    stock::mock::MockStockClient,
    types::LlmConfig,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> OpenAiClient {
    let config = LlmConfig {
        base_url: server.uri(),
        api_key: Some("sk-test".to_string()),
        model: "gpt-4o-mini".to_string(),
        timeout: Duration::from_secs(5),
    };
    OpenAiClient::new(&config, Arc::new(MockStockClient::with_sample_data())).unwrap()
}

fn text_completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_plain_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_string_contains("\"tools\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_completion(
            "The Saudi Exchange is closed on Fridays and Saturdays.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .answer(&[ChatMessage::user("When is the market closed?")], None)
        .await
        .unwrap();

    assert_eq!(
        reply.answer,
        "The Saudi Exchange is closed on Fridays and Saturdays."
    );
    assert_eq!(reply.chart, None);
    assert_eq!(reply.stocks, None);
}

#[tokio::test]
async fn test_tool_call_round_trip() {
    let server = MockServer::start().await;

    // Follow-up carrying the tool result
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"tool_call_id\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_completion("Aramco traded near 27.5 SAR this week.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // First completion asks for price history
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"tools\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "detailed_company_stock_prices",
                            "arguments": "{\"company\":\"2222\",\"days\":2}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .answer(&[ChatMessage::user("How did Aramco trade?")], None)
        .await
        .unwrap();

    assert_eq!(reply.answer, "Aramco traded near 27.5 SAR this week.");
    assert_eq!(reply.chart, Some(ChartKind::DetailedCompanyStockPrices));
    match reply.stocks {
        Some(ChartStocks::Prices(points)) => {
            assert_eq!(points.len(), 2);
            assert_eq!(points[0].x, 0);
            assert_eq!(points[1].date, "2025-03-03");
        }
        other => panic!("unexpected stocks: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_tool_yields_text_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"tool_call_id\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_completion("I could not find that company on Tadawul.")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"tools\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "call_2",
                        "type": "function",
                        "function": {
                            "name": "search_company_stocks",
                            "arguments": "{\"query\":\"Nonexistent Holdings\"}"
                        }
                    }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let reply = client(&server)
        .answer(&[ChatMessage::user("Tell me about Nonexistent Holdings")], None)
        .await
        .unwrap();

    assert_eq!(reply.answer, "I could not find that company on Tadawul.");
    assert_eq!(reply.chart, None);
}

#[tokio::test]
async fn test_context_reaches_system_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("argaam-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_completion("It is ARAMCO.")))
        .expect(1)
        .mount(&server)
        .await;

    let context = json!({ "chart": "search_company_stocks", "stocks": { "argaamID": "argaam-1" } });
    let reply = client(&server)
        .answer(&[ChatMessage::user("Which company is this?")], Some(&context))
        .await
        .unwrap();

    assert_eq!(reply.answer, "It is ARAMCO.");
}

#[tokio::test]
async fn test_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server)
        .answer(&[ChatMessage::user("hi")], None)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::RateLimited));
}

#[tokio::test]
async fn test_empty_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client(&server)
        .answer(&[ChatMessage::user("hi")], None)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .answer(&[ChatMessage::user("hi")], None)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Http { status: 500, .. }));
}
