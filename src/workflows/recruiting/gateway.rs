use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tokio::runtime::Runtime;
use tracing::{error, info};

use crate::config::OpenAiConfig;

/// One generation call: prompts plus the call site's sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Failures talking to the external language services. Never retried at this
/// layer; callers decide whether a failure is terminal.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("external service call failed: {0}")]
    Transport(String),
    #[error("external service returned an unusable payload: {0}")]
    Payload(String),
    #[error("gateway runtime unavailable: {0}")]
    Runtime(String),
}

/// Text-generation collaborator (chat-completion style).
pub trait GenerationGateway: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

/// Embedding collaborator producing fixed-length vectors.
pub trait EmbeddingGateway: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError>;
}

impl<T: GenerationGateway + ?Sized> GenerationGateway for Arc<T> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        (**self).complete(request)
    }
}

impl<T: EmbeddingGateway + ?Sized> EmbeddingGateway for Arc<T> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        (**self).embed(text)
    }
}

/// Client for an OpenAI-compatible HTTP API implementing both gateways. The
/// async reqwest client is driven from a dedicated runtime so synchronous
/// workflow code never sees async details.
pub struct OpenAiClient {
    http: reqwest::Client,
    runtime: Runtime,
    api_key: String,
    base_url: String,
    generation_model: String,
    embedding_model: String,
}

impl OpenAiClient {
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, GatewayError> {
        let runtime = Runtime::new().map_err(|err| GatewayError::Runtime(err.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| GatewayError::Runtime(err.to_string()))?;

        Ok(Self {
            http,
            runtime,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generation_model: config.generation_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, GatewayError> {
        let url = format!("{}/{path}", self.base_url);
        self.runtime.block_on(async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await
                .map_err(|err| GatewayError::Transport(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                error!(%status, %url, "language service returned an error");
                return Err(GatewayError::Transport(format!("{status}: {detail}")));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|err| GatewayError::Payload(err.to_string()))
        })
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("generation_model", &self.generation_model)
            .field("embedding_model", &self.embedding_model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

impl GenerationGateway for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = json!({
            "model": self.generation_model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let value = self.post_json("chat/completions", &body)?;
        let parsed: ChatCompletionResponse =
            serde_json::from_value(value).map_err(|err| GatewayError::Payload(err.to_string()))?;

        info!(model = %self.generation_model, "completion received");
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Payload("completion contained no choices".to_string()))
    }
}

impl EmbeddingGateway for OpenAiClient {
    fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        let body = json!({
            "model": self.embedding_model,
            "input": [text],
        });

        let value = self.post_json("embeddings", &body)?;
        let parsed: EmbeddingResponse =
            serde_json::from_value(value).map_err(|err| GatewayError::Payload(err.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|row| row.embedding)
            .ok_or_else(|| GatewayError::Payload("embedding response contained no rows".to_string()))
    }
}
