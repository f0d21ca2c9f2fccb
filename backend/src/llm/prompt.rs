use serde_json::Value;

use super::wire::WireMessage;
use super::ChatMessage;

const SYSTEM_PROMPT: &str = "\
You are Stockbot, an assistant for investors following the Saudi Exchange (Tadawul).
Answer in the language the user writes in (Arabic or English).
Quote prices in Saudi riyals (SAR) and keep answers short and factual.
Use the provided tools whenever the user asks about a specific listed company, its price,
trading volume or daily range; never invent market data.
You do not give personalised investment advice.";

/// Builds the message list for the first completion
///
/// The attached chart, if any, is appended to the system prompt as JSON.
pub fn conversation(history: &[ChatMessage], context: Option<&Value>) -> Vec<WireMessage> {
    let mut system = SYSTEM_PROMPT.to_string();
    if let Some(context) = context.filter(|context| !context.is_null()) {
        system.push_str("\n\nThe user attached the following chart data to their question:\n");
        system.push_str(&context.to_string());
    }

    std::iter::once(WireMessage::system(system))
        .chain(history.iter().map(WireMessage::from))
        .collect()
}
