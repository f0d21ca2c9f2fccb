//! Stock tools offered to the model and their execution

use std::str::FromStr;

use serde::Deserialize;
use serde_json::json;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::wire::{FunctionCall, FunctionDefinition, ToolDefinition};
use super::{ChartKind, ChartStocks};
use crate::stock::{find_company, history_days, StockClient, StockError, StockPrice};

/// Why a tool call could not be honoured
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model asked for a function that is not offered
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments did not match the tool schema
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Tool name
        tool: String,
        /// Parser message
        reason: String,
    },

    /// No listed company matches the requested one
    #[error("no listed company matches '{0}'")]
    CompanyNotFound(String),

    /// The stock provider failed
    #[error(transparent)]
    Stock(#[from] StockError),
}

/// Result of a successful tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// Chart the data is meant for
    pub chart: ChartKind,
    /// Tool result
    pub stocks: ChartStocks,
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
}

#[derive(Deserialize)]
struct HistoryArgs {
    company: String,
    #[serde(default)]
    days: Option<u32>,
}

/// Function definitions advertised on the first completion
pub fn definitions() -> Vec<ToolDefinition> {
    ChartKind::iter()
        .map(|kind| ToolDefinition {
            kind: "function",
            function: FunctionDefinition {
                name: kind.into(),
                description: description(kind),
                parameters: parameters(kind),
            },
        })
        .collect()
}

const fn description(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::SearchCompanyStocks => {
            "Look up a company listed on the Saudi Exchange (Tadawul) and return its latest quote, sector and identifiers."
        }
        ChartKind::DetailedCompanyStockPrices => {
            "Return the daily open/high/low/close price history of a listed company, for price trend questions."
        }
        ChartKind::StockVolumeAnalysis => {
            "Return the daily traded volume history of a listed company, for liquidity and volume questions."
        }
        ChartKind::PriceRangeAnalysis => {
            "Return the daily high/low price range of a listed company, for volatility questions."
        }
    }
}

fn parameters(kind: ChartKind) -> serde_json::Value {
    match kind {
        ChartKind::SearchCompanyStocks => json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Company name, short name or Tadawul ticker, e.g. \"Aramco\" or \"2222\""
                }
            },
            "required": ["query"]
        }),
        ChartKind::DetailedCompanyStockPrices
        | ChartKind::StockVolumeAnalysis
        | ChartKind::PriceRangeAnalysis => json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Company name, short name or Tadawul ticker"
                },
                "days": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 365,
                    "description": "Number of trading days of history, default 30"
                }
            },
            "required": ["company"]
        }),
    }
}

/// Runs a tool call requested by the model against the stock client
///
/// # Errors
///
/// Returns an error if the tool is unknown, its arguments are malformed, the
/// company cannot be found or the stock provider fails
pub async fn execute(stock: &dyn StockClient, call: &FunctionCall) -> Result<ToolOutput, ToolError> {
    let kind = ChartKind::from_str(&call.name)
        .map_err(|_| ToolError::UnknownTool(call.name.clone()))?;
    let invalid = |err: serde_json::Error| ToolError::InvalidArguments {
        tool: call.name.clone(),
        reason: err.to_string(),
    };

    tracing::info!(tool = %call.name, "Executing stock tool");

    let companies = stock.companies().await?;
    match kind {
        ChartKind::SearchCompanyStocks => {
            let args: SearchArgs = serde_json::from_str(&call.arguments).map_err(invalid)?;
            let company = find_company(&companies, &args.query)
                .ok_or(ToolError::CompanyNotFound(args.query))?;
            Ok(ToolOutput {
                chart: kind,
                stocks: ChartStocks::Company(company.clone()),
            })
        }
        ChartKind::DetailedCompanyStockPrices
        | ChartKind::StockVolumeAnalysis
        | ChartKind::PriceRangeAnalysis => {
            let args: HistoryArgs = serde_json::from_str(&call.arguments).map_err(invalid)?;
            let company = find_company(&companies, &args.company)
                .ok_or_else(|| ToolError::CompanyNotFound(args.company.clone()))?;
            let rows = stock
                .price_history(company.company_id, history_days(args.days))
                .await?;
            Ok(ToolOutput {
                chart: kind,
                stocks: ChartStocks::Prices(StockPrice::series(rows)),
            })
        }
    }
}
