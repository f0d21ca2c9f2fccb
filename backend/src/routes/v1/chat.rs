use axum::{Extension, Json};
use tracing::instrument;

use crate::i18n::{Locale, Message};
use crate::service::{ChatAnswer, ChatRequest, SharedChatService};
use crate::types::{ApiResponse, AppError, ValidatedJson};

/// Answers the last user turn of a conversation
///
/// When the model looked up market data, `chart` names the chart to render
/// and `stocks` carries its data.
#[instrument(skip_all, fields(turns = payload.messages.len()))]
pub async fn handler(
    Extension(service): Extension<SharedChatService>,
    locale: Locale,
    ValidatedJson(payload): ValidatedJson<ChatRequest>,
) -> Result<Json<ApiResponse<ChatAnswer>>, AppError> {
    let answer = service.chat(payload).await?;
    tracing::info!(chart = ?answer.chart, "Chat answered");

    Ok(Json(ApiResponse::new(
        answer,
        locale.text(Message::ChatAnswered),
    )))
}
