use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::llm::{ChartKind, ChartStocks, ChatMessage, LlmReply};

/// Longest question accepted, in characters
pub const MAX_QUESTION_CHARS: usize = 4000;

/// Body of `POST /api/v1/chat`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct ChatRequest {
    /// Conversation so far, oldest first; the last turn must come from the user
    ///
    /// Earlier turns are passed through as-is and trimmed by the service.
    #[validate(length(min = 1), custom(function = "validate_question"))]
    pub messages: Vec<ChatMessage>,

    /// Chart data the user attached to the question
    #[serde(default)]
    pub context: Option<Value>,
}

/// Only the newest turn is bounded; history may hold long earlier answers
fn validate_question(messages: &[ChatMessage]) -> Result<(), ValidationError> {
    match messages.last() {
        Some(last)
            if last.content.trim().is_empty()
                || last.content.chars().count() > MAX_QUESTION_CHARS =>
        {
            Err(ValidationError::new("question_length"))
        }
        _ => Ok(()),
    }
}

/// Answer returned by `POST /api/v1/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChatAnswer {
    /// Natural-language answer
    pub answer: String,
    /// Data backing the chart, omitted when there is none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stocks: Option<ChartStocks>,
    /// Chart to render next to the answer, `null` when none
    pub chart: Option<ChartKind>,
}

impl From<LlmReply> for ChatAnswer {
    fn from(reply: LlmReply) -> Self {
        Self {
            answer: reply.answer,
            stocks: reply.stocks,
            chart: reply.chart,
        }
    }
}

/// Query string of `GET /api/v1/dashboard/chart`
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    /// Provider company identifier; takes precedence over `tadawulId`
    pub company_id: Option<u64>,
    /// Tadawul ticker
    #[validate(length(min = 1, max = 16))]
    pub tadawul_id: Option<String>,
    /// Trading days of history (default 30, at most 365)
    pub days: Option<u32>,
}
