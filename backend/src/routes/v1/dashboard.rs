use axum::{Extension, Json};
use tracing::instrument;

use crate::i18n::{Locale, Message};
use crate::service::{ChartQuery, SharedChatService};
use crate::stock::{DashboardStock, StockPrice};
use crate::types::{ApiResponse, AppError, ValidatedQuery};

/// Listed companies, sorted by daily gain
#[instrument(skip_all)]
pub async fn list(
    Extension(service): Extension<SharedChatService>,
    locale: Locale,
) -> Result<Json<ApiResponse<Vec<DashboardStock>>>, AppError> {
    let stocks = service.dashboard().await?;

    Ok(Json(ApiResponse::new(
        stocks,
        locale.text(Message::DashboardLoaded),
    )))
}

/// Price history of one company, by `companyId` or `tadawulId`
#[instrument(skip_all, fields(company_id = ?query.company_id, tadawul_id = ?query.tadawul_id))]
pub async fn chart(
    Extension(service): Extension<SharedChatService>,
    locale: Locale,
    ValidatedQuery(query): ValidatedQuery<ChartQuery>,
) -> Result<Json<ApiResponse<Vec<StockPrice>>>, AppError> {
    let points = service.company_chart(query).await?;

    Ok(Json(ApiResponse::new(
        points,
        locale.text(Message::ChartLoaded),
    )))
}
