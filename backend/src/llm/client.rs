use std::sync::Arc;

use reqwest::{header, Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::{json, Value};

use super::wire::{CompletionRequest, CompletionResponse, ResponseMessage, WireMessage};
use super::{prompt, tools, ChatMessage, LlmClient, LlmError, LlmReply};
use crate::stock::StockClient;
use crate::types::LlmConfig;

/// Sampling temperature; low to keep figures faithful to tool output
const TEMPERATURE: f32 = 0.2;

/// Client for an OpenAI-compatible chat completions endpoint
///
/// Stock lookups are exposed to the model as tools and executed through the
/// stock client this client holds.
pub struct OpenAiClient {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    http_client: ClientWithMiddleware,
    stock: Arc<dyn StockClient>,
}

impl OpenAiClient {
    /// Creates a new LLM client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(config: &LlmConfig, stock: Arc<dyn StockClient>) -> Result<Self, LlmError> {
        let reqwest_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::Network(format!("Failed to create HTTP client: {e}")))?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            endpoint: format!("{}/chat/completions", config.base_url),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http_client,
            stock,
        })
    }

    fn request(&self, messages: Vec<WireMessage>, with_tools: bool) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages,
            tools: with_tools.then(tools::definitions),
            tool_choice: with_tools.then_some("auto"),
            temperature: TEMPERATURE,
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ResponseMessage, LlmError> {
        let body = serde_json::to_vec(request)?;

        let mut builder = self
            .http_client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(api_key) = &self.api_key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {api_key}"));
        }

        let response = builder.body(body).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    async fn answer(
        &self,
        history: &[ChatMessage],
        context: Option<&Value>,
    ) -> Result<LlmReply, LlmError> {
        let mut messages = prompt::conversation(history, context);

        let first = self.complete(&self.request(messages.clone(), true)).await?;
        let Some(call) = first.tool_calls.and_then(|calls| calls.into_iter().next()) else {
            return Ok(LlmReply::text(non_empty(first.content)?));
        };

        let (tool_content, output) = match tools::execute(self.stock.as_ref(), &call.function).await {
            Ok(output) => (serde_json::to_string(&output.stocks)?, Some(output)),
            Err(err) => {
                tracing::warn!(tool = %call.function.name, "Tool call failed: {err}");
                (json!({ "error": err.to_string() }).to_string(), None)
            }
        };

        let call_id = call.id.clone();
        messages.push(WireMessage::assistant_tool_call(first.content, call));
        messages.push(WireMessage::tool_result(call_id, tool_content));

        let second = self.complete(&self.request(messages, false)).await?;
        let answer = non_empty(second.content)?;

        Ok(match output {
            Some(output) => LlmReply {
                answer,
                chart: Some(output.chart),
                stocks: Some(output.stocks),
            },
            None => LlmReply::text(answer),
        })
    }
}

fn non_empty(content: Option<String>) -> Result<String, LlmError> {
    content
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(LlmError::EmptyResponse)
}
