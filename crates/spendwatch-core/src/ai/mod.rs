//! Advisory backend abstraction
//!
//! The insight engine talks to an advisory model through the
//! `AdvisorBackend` trait. `AdvisorClient` is the concrete enum used
//! at call sites so the engine stays `Clone` without boxing.

mod mock;
mod openai;
pub mod parsing;

pub use mock::MockAdvisor;
pub use openai::OpenAiAdvisor;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;

#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Sends a prompt and returns the raw model reply.
    async fn advise(&self, prompt: &str) -> Result<String>;

    /// True when the backend is reachable.
    async fn health_check(&self) -> bool;

    fn model(&self) -> &str;

    fn host(&self) -> &str;
}

/// Concrete advisory client.
#[derive(Debug, Clone)]
pub enum AdvisorClient {
    OpenAi(OpenAiAdvisor),
    Mock(MockAdvisor),
}

impl AdvisorClient {
    /// Builds a client from the environment, or `None` when no
    /// backend is configured. `ADVISOR_BACKEND` selects the backend
    /// ("openai" is the default; "mock" is for local development).
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("ADVISOR_BACKEND").unwrap_or_else(|_| "openai".to_string());
        match backend.as_str() {
            "mock" => {
                info!("using mock advisory backend");
                Some(AdvisorClient::Mock(MockAdvisor::default()))
            }
            "openai" => {
                let advisor = OpenAiAdvisor::from_env()?;
                info!(model = advisor.model(), host = advisor.host(), "using OpenAI advisory backend");
                Some(AdvisorClient::OpenAi(advisor))
            }
            other => {
                info!(backend = other, "unknown advisory backend, insights will use fallbacks");
                None
            }
        }
    }
}

#[async_trait]
impl AdvisorBackend for AdvisorClient {
    async fn advise(&self, prompt: &str) -> Result<String> {
        match self {
            AdvisorClient::OpenAi(a) => a.advise(prompt).await,
            AdvisorClient::Mock(a) => a.advise(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AdvisorClient::OpenAi(a) => a.health_check().await,
            AdvisorClient::Mock(a) => a.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AdvisorClient::OpenAi(a) => a.model(),
            AdvisorClient::Mock(a) => a.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AdvisorClient::OpenAi(a) => a.host(),
            AdvisorClient::Mock(a) => a.host(),
        }
    }
}
