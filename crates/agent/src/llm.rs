use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use advisor_core::config::LlmConfig;
use advisor_core::errors::ApplicationError;

/// Failures talking to the ranker. The display text doubles as the summary
/// shown to the user when a request fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("API Error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("Error connecting to AI service: {0}")]
    Transport(String),
    #[error("Error connecting to AI service: Invalid response structure from API")]
    InvalidResponse,
    #[error("Error connecting to AI service: no reply within {0}s")]
    Timeout(u64),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: SecretString,
    generation: GenerationConfig,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, ApplicationError> {
        let api_key = config.require_api_key()?.clone();
        Ok(Self {
            http: Client::new(),
            endpoint: config.endpoint(),
            api_key,
            generation: GenerationConfig {
                temperature: config.temperature,
                top_k: config.top_k,
                top_p: config.top_p,
                max_output_tokens: config.max_output_tokens,
            },
        })
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: [RequestContent { parts: [RequestPart { text: prompt }] }],
            generation_config: self.generation,
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(
            event_name = "advisor.llm.request",
            endpoint = %self.endpoint,
            prompt_chars = prompt.len(),
            "sending ranking request"
        );

        let url = format!("{}?key={}", self.endpoint, self.api_key.expose_secret());
        let response = self
            .http
            .post(url)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|error| LlmError::Transport(error.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = api_error_message(&raw)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(LlmError::Status { status: status.as_u16(), message });
        }

        let payload: GenerateResponse =
            response.json().await.map_err(|_| LlmError::InvalidResponse)?;
        first_candidate_text(payload).ok_or(LlmError::InvalidResponse)
    }
}

fn first_candidate_text(payload: GenerateResponse) -> Option<String> {
    payload.candidates.into_iter().next()?.content?.parts.into_iter().next()?.text
}

fn api_error_message(raw: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(raw).ok()?.error?.message
}
