use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

use crate::stock::{CompanyInfo, StockPrice};

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user
    User,
    /// The assistant
    Assistant,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    /// Author of the turn
    pub role: Role,
    /// Text of the turn
    pub content: String,
}

impl ChatMessage {
    /// Convenience constructor for a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Convenience constructor for an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Visualisation attached to an answer; the names double as tool names
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    AsRefStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    /// Company information card
    SearchCompanyStocks,
    /// Price history line chart
    DetailedCompanyStockPrices,
    /// Volume bar chart
    StockVolumeAnalysis,
    /// Daily high/low range chart
    PriceRangeAnalysis,
}

/// Data backing a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ChartStocks {
    /// Single company card
    Company(CompanyInfo),
    /// Price series, oldest first
    Prices(Vec<StockPrice>),
}

/// Answer produced by the LLM client
#[derive(Debug, Clone, PartialEq)]
pub struct LlmReply {
    /// Natural-language answer
    pub answer: String,
    /// Chart the answer refers to, if a tool was used
    pub chart: Option<ChartKind>,
    /// Data backing the chart
    pub stocks: Option<ChartStocks>,
}

impl LlmReply {
    /// Reply without any chart
    pub fn text(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            chart: None,
            stocks: None,
        }
    }
}
