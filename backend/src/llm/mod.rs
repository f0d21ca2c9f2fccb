//! Natural-language answers backed by an OpenAI-compatible model.
//!
//! The model can call stock tools; the tool that was used
//! decides which chart the frontend renders next to the answer.

mod client;
mod error;
mod prompt;
mod tools;
mod types;
mod wire;

pub use client::OpenAiClient;
pub use error::LlmError;
pub use types::{ChartKind, ChartStocks, ChatMessage, LlmReply, Role};

use serde_json::Value;

/// Generates answers for a conversation
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Answers the last user turn of `history`
    ///
    /// `context` is chart data the user attached to the question, if any.
    async fn answer(
        &self,
        history: &[ChatMessage],
        context: Option<&Value>,
    ) -> Result<LlmReply, LlmError>;
}

/// Scripted LLM client for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::Mutex;

    use serde_json::Value;

    use super::{ChatMessage, LlmClient, LlmError, LlmReply};

    enum Behavior {
        Reply(LlmReply),
        RateLimited,
        Unavailable,
    }

    /// LLM client returning a canned reply and recording what it was asked
    pub struct MockLlmClient {
        behavior: Behavior,
        calls: Mutex<Vec<(Vec<ChatMessage>, Option<Value>)>>,
    }

    impl MockLlmClient {
        /// Answers every conversation with `reply`
        #[must_use]
        pub fn replying(reply: LlmReply) -> Self {
            Self::with_behavior(Behavior::Reply(reply))
        }

        /// Fails every call with [`LlmError::RateLimited`]
        #[must_use]
        pub fn rate_limited() -> Self {
            Self::with_behavior(Behavior::RateLimited)
        }

        /// Fails every call with an upstream 500
        #[must_use]
        pub fn unavailable() -> Self {
            Self::with_behavior(Behavior::Unavailable)
        }

        const fn with_behavior(behavior: Behavior) -> Self {
            Self {
                behavior,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Conversations received so far
        ///
        /// # Panics
        ///
        /// Panics if the call log mutex is poisoned
        #[must_use]
        pub fn calls(&self) -> Vec<(Vec<ChatMessage>, Option<Value>)> {
            self.calls.lock().expect("call log poisoned").clone()
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for MockLlmClient {
        async fn answer(
            &self,
            history: &[ChatMessage],
            context: Option<&Value>,
        ) -> Result<LlmReply, LlmError> {
            self.calls
                .lock()
                .expect("call log poisoned")
                .push((history.to_vec(), context.cloned()));

            match &self.behavior {
                Behavior::Reply(reply) => Ok(reply.clone()),
                Behavior::RateLimited => Err(LlmError::RateLimited),
                Behavior::Unavailable => Err(LlmError::Http {
                    status: 500,
                    body: "upstream failure".to_string(),
                }),
            }
        }
    }
}
