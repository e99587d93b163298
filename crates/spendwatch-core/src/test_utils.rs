//! Test utilities for spendwatch-core
//!
//! Provides a mock advisory HTTP server speaking the OpenAI
//! chat-completions shape, for exercising the real HTTP backend in
//! integration tests without a network dependency.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::oneshot;

/// Mock advisory server. Replies to every chat-completion request
/// with a fixed message body.
pub struct MockAdvisoryServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

const DEFAULT_REPLY: &str =
    r#"{"recommendations": [], "alerts": [], "insights": [{"type": "tip", "message": "Track your spending weekly."}]}"#;

impl MockAdvisoryServer {
    /// Starts the server on an ephemeral port with the default reply.
    pub async fn start() -> Self {
        Self::start_with_reply(DEFAULT_REPLY).await
    }

    /// Starts the server with a scripted reply body.
    pub async fn start_with_reply(reply: &str) -> Self {
        let reply = Arc::new(reply.to_string());
        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(reply);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL for pointing an `OpenAiAdvisor` at this server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockAdvisoryServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        data: vec![ModelEntry {
            id: "gpt-3.5-turbo".to_string(),
        }],
    })
}

async fn handle_chat(State(reply): State<Arc<String>>) -> Json<ChatResponse> {
    Json(ChatResponse {
        choices: vec![Choice {
            message: Message {
                role: "assistant".to_string(),
                content: reply.as_ref().clone(),
            },
        }],
    })
}

#[derive(Serialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Serialize)]
struct ModelEntry {
    id: String,
}

#[derive(Serialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Serialize)]
struct Choice {
    message: Message,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AdvisorBackend, OpenAiAdvisor};
    use crate::ai::parsing::parse_insight_bundle;

    #[tokio::test]
    async fn test_mock_server_health_check() {
        let server = MockAdvisoryServer::start().await;
        let client = OpenAiAdvisor::new(&server.url(), "test-model", "test-key");
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_server_advise_round_trip() {
        let server = MockAdvisoryServer::start().await;
        let client = OpenAiAdvisor::new(&server.url(), "test-model", "test-key");

        let reply = client.advise("analyze my spending").await.unwrap();
        let bundle = parse_insight_bundle(&reply).unwrap();
        assert_eq!(bundle.insights.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_server_scripted_reply() {
        let server = MockAdvisoryServer::start_with_reply(
            r#"{"recommendations": [{"category": "travel", "message": "Book early."}], "alerts": [], "insights": []}"#,
        )
        .await;
        let client = OpenAiAdvisor::new(&server.url(), "test-model", "test-key");

        let reply = client.advise("analyze").await.unwrap();
        let bundle = parse_insight_bundle(&reply).unwrap();
        assert_eq!(bundle.recommendations[0].category, "travel");
    }

    #[tokio::test]
    async fn test_openai_advisor_model_and_host() {
        let client = OpenAiAdvisor::new("https://api.openai.com/", "gpt-3.5-turbo", "key");
        assert_eq!(client.model(), "gpt-3.5-turbo");
        assert_eq!(client.host(), "https://api.openai.com");
    }
}
