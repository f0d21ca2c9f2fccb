//! Chat service: the domain operations behind every API route.

mod error;
mod types;

use std::cmp::Ordering;
use std::sync::Arc;

pub use error::ServiceError;
pub use types::{ChartQuery, ChatAnswer, ChatRequest, MAX_QUESTION_CHARS};

use crate::llm::{LlmClient, Role};
use crate::stock::{history_days, DashboardStock, StockClient, StockPrice};
use crate::types::Config;

/// Shared handle injected into the handlers
pub type SharedChatService = Arc<dyn ChatService>;

/// Operations exposed over HTTP
#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    /// Answers the last user turn of a conversation
    async fn chat(&self, request: ChatRequest) -> Result<ChatAnswer, ServiceError>;

    /// Every listed company, best performers first
    async fn dashboard(&self) -> Result<Vec<DashboardStock>, ServiceError>;

    /// Price history of one company, oldest first
    async fn company_chart(&self, query: ChartQuery) -> Result<Vec<StockPrice>, ServiceError>;
}

/// Chat service combining the LLM and stock clients
pub struct StockChatService {
    llm: Arc<dyn LlmClient>,
    stock: Arc<dyn StockClient>,
    history_limit: usize,
}

impl StockChatService {
    /// Creates the service from its collaborators
    #[must_use]
    pub fn new(config: &Config, llm: Arc<dyn LlmClient>, stock: Arc<dyn StockClient>) -> Self {
        Self {
            llm,
            stock,
            history_limit: config.chat_history_limit.max(1),
        }
    }
}

#[async_trait::async_trait]
impl ChatService for StockChatService {
    async fn chat(&self, request: ChatRequest) -> Result<ChatAnswer, ServiceError> {
        let Some(last) = request.messages.last() else {
            return Err(ServiceError::InvalidInput("At least one message is required"));
        };
        if last.role != Role::User {
            return Err(ServiceError::InvalidInput(
                "The last message must come from the user",
            ));
        }
        if last.content.trim().is_empty() {
            return Err(ServiceError::InvalidInput("The message must not be blank"));
        }

        let start = request.messages.len().saturating_sub(self.history_limit);
        let history = &request.messages[start..];
        tracing::debug!(turns = history.len(), "Forwarding conversation to LLM");

        let reply = self.llm.answer(history, request.context.as_ref()).await?;
        Ok(reply.into())
    }

    async fn dashboard(&self) -> Result<Vec<DashboardStock>, ServiceError> {
        let mut rows: Vec<DashboardStock> = self
            .stock
            .companies()
            .await?
            .iter()
            .map(DashboardStock::from)
            .collect();

        // Best performers first; NaN sorts last
        rows.sort_by(|a, b| match (a.percentage_gained.is_nan(), b.percentage_gained.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => b.percentage_gained.total_cmp(&a.percentage_gained),
        });

        Ok(rows)
    }

    async fn company_chart(&self, query: ChartQuery) -> Result<Vec<StockPrice>, ServiceError> {
        let company_id = match (query.company_id, query.tadawul_id.as_deref()) {
            (Some(company_id), _) => company_id,
            (None, Some(tadawul_id)) => {
                let tadawul_id = tadawul_id.trim();
                self.stock
                    .companies()
                    .await?
                    .iter()
                    .find(|company| company.tadawul_id.eq_ignore_ascii_case(tadawul_id))
                    .map(|company| company.company_id)
                    .ok_or_else(|| ServiceError::CompanyNotFound(tadawul_id.to_string()))?
            }
            (None, None) => return Err(ServiceError::MissingCompanyIdentifier),
        };

        let rows = self
            .stock
            .price_history(company_id, history_days(query.days))
            .await?;

        Ok(StockPrice::series(rows))
    }
}

/// Canned chat service for router tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::time::Duration;

    use super::{
        ChartQuery, ChatAnswer, ChatRequest, ChatService, DashboardStock, ServiceError, StockPrice,
    };

    /// Chat service returning canned data
    #[derive(Default)]
    pub struct MockChatService {
        answer: Option<ChatAnswer>,
        dashboard: Vec<DashboardStock>,
        chart: Vec<StockPrice>,
        panic_on_chat: bool,
        dashboard_delay: Option<Duration>,
    }

    impl MockChatService {
        /// Answer returned by `chat`
        #[must_use]
        pub fn with_answer(mut self, answer: ChatAnswer) -> Self {
            self.answer = Some(answer);
            self
        }

        /// Rows returned by `dashboard`
        #[must_use]
        pub fn with_dashboard(mut self, rows: Vec<DashboardStock>) -> Self {
            self.dashboard = rows;
            self
        }

        /// Points returned by `company_chart`
        #[must_use]
        pub fn with_chart(mut self, points: Vec<StockPrice>) -> Self {
            self.chart = points;
            self
        }

        /// Makes `chat` panic, to exercise the recovery middleware
        #[must_use]
        pub const fn panicking(mut self) -> Self {
            self.panic_on_chat = true;
            self
        }

        /// Makes `dashboard` sleep before answering
        #[must_use]
        pub const fn with_dashboard_delay(mut self, delay: Duration) -> Self {
            self.dashboard_delay = Some(delay);
            self
        }
    }

    #[async_trait::async_trait]
    impl ChatService for MockChatService {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatAnswer, ServiceError> {
            assert!(!self.panic_on_chat, "chat service exploded");
            self.answer
                .clone()
                .ok_or(ServiceError::InvalidInput("No canned answer configured"))
        }

        async fn dashboard(&self) -> Result<Vec<DashboardStock>, ServiceError> {
            if let Some(delay) = self.dashboard_delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.dashboard.clone())
        }

        async fn company_chart(&self, query: ChartQuery) -> Result<Vec<StockPrice>, ServiceError> {
            if query.company_id.is_none() && query.tadawul_id.is_none() {
                return Err(ServiceError::MissingCompanyIdentifier);
            }
            Ok(self.chart.clone())
        }
    }
}
