//! Scripted advisory backend for tests and local development

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AdvisorBackend;

const DEFAULT_REPLY: &str = r#"{
  "recommendations": [
    {
      "category": "dining",
      "message": "Cook at home two more nights a week.",
      "actionSteps": ["Plan meals on Sunday", "Batch-cook staples"],
      "potentialSavings": 120.0
    }
  ],
  "alerts": [],
  "insights": [
    {"type": "tip", "message": "Set aside savings on payday before spending."}
  ]
}"#;

/// Advisory backend with a scripted reply. Can be configured to
/// fail or to delay, for exercising the engine's degraded paths.
#[derive(Debug, Clone, Default)]
pub struct MockAdvisor {
    reply: Option<String>,
    delay: Option<Duration>,
    fail: bool,
}

impl MockAdvisor {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Every `advise` call returns an error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Sleeps before replying, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl AdvisorBackend for MockAdvisor {
    async fn advise(&self, _prompt: &str) -> Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::Advisor("mock advisor configured to fail".to_string()));
        }
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| DEFAULT_REPLY.to_string()))
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://local"
    }
}
