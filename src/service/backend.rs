//! Completion backends
//!
//! The service never loads model weights itself: prompts are forwarded to an
//! OpenAI-compatible `/v1/completions` server (llama.cpp server, LocalAI,
//! vLLM, Ollama).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::describe_error_chain;
use crate::storage::settings::ServerSettings;

/// Sampling parameters for one completion
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.1,
            top_p: 0.9,
            repeat_penalty: 1.1,
        }
    }
}

impl From<&ServerSettings> for GenerationParams {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
            repeat_penalty: settings.repeat_penalty,
        }
    }
}

/// Backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{}", describe_error_chain(.0))]
    Http(#[from] reqwest::Error),
    #[error("Completion API error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Completion API error: {0}")]
    Api(String),
    #[error("No completion text in backend response")]
    Empty,
}

/// Text-completion engine the service forwards prompts to
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Human-readable identifier, used in logs
    fn name(&self) -> &str;

    /// Generate a continuation of `prompt`.
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, BackendError>;

    /// Cheap reachability check, run once at startup.
    async fn check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

// ============================================================================
// OpenAI-compatible completions API types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================================================
// OpenAiCompletionBackend
// ============================================================================

pub struct OpenAiCompletionBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiCompletionBackend {
    pub fn new(base_url: &str, model: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_settings(settings: &ServerSettings) -> Result<Self, BackendError> {
        Self::new(
            &settings.backend_url,
            settings.backend_model.clone(),
            settings.backend_timeout(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletionBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, BackendError> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            repeat_penalty: params.repeat_penalty,
        };

        let response = self
            .http
            .post(self.endpoint("/v1/completions"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let api_response: CompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| BackendError::Api(format!("invalid response: {}", e)))?;

        if let Some(error) = api_response.error {
            return Err(BackendError::Api(error.message));
        }

        api_response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .map(|choice| choice.text)
            .ok_or(BackendError::Empty)
    }

    async fn check(&self) -> Result<(), BackendError> {
        let response = self.http.get(self.endpoint("/v1/models")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}
