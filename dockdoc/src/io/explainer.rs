//! Explanation service abstraction.
//!
//! The [`Explainer`] trait decouples analysis orchestration from the actual
//! text-generation backend (an OpenAI-compatible chat-completions endpoint).
//! Tests use scripted explainers that return canned explanations without
//! touching the network.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::io::config::{ExplainerSettings, GenerationParams};

/// Failure reported by the explanation backend for one prompt.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to explanation service failed")]
    Transport(#[source] reqwest::Error),
    #[error("explanation service rejected credentials (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },
    #[error("explanation service rate limit exceeded: {body}")]
    RateLimited { body: String },
    #[error("explanation service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed explanation response: {0}")]
    MalformedResponse(String),
}

/// Abstraction over explanation backends.
pub trait Explainer {
    /// Return a prose explanation for `prompt`.
    fn explain(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    response_format: ResponseFormat,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Explainer backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiExplainer {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    generation: GenerationParams,
}

impl OpenAiExplainer {
    pub fn new(settings: &ExplainerSettings, api_key: String) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(ServiceError::Transport)?;
        Ok(Self::with_client(settings, api_key, client))
    }

    pub fn with_client(settings: &ExplainerSettings, api_key: String, client: Client) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                settings.api_base_url.trim_end_matches('/')
            ),
            api_key,
            model: settings.model.clone(),
            generation: settings.generation,
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat { kind: "text" },
            temperature: self.generation.temperature,
            top_p: self.generation.top_p,
            frequency_penalty: self.generation.frequency_penalty,
            presence_penalty: self.generation.presence_penalty,
            max_completion_tokens: self.generation.max_completion_tokens,
        }
    }
}

impl Explainer for OpenAiExplainer {
    #[instrument(skip_all, fields(model = %self.model, prompt_bytes = prompt.len()))]
    fn explain(&self, prompt: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        let body = response.text().map_err(ServiceError::Transport)?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "explanation request failed");
            return Err(status_error(status, body));
        }

        let parsed = parse_response(&body)?;
        debug!(explanation_bytes = parsed.len(), "received explanation");
        Ok(parsed)
    }
}

fn status_error(status: StatusCode, body: String) -> ServiceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Authentication {
            status: status.as_u16(),
            body,
        },
        StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited { body },
        _ => ServiceError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

fn parse_response(body: &str) -> Result<String, ServiceError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ServiceError::MalformedResponse("response has no message content".into()))
}
