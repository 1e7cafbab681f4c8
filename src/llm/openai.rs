//! OpenAI chat completion client.
//!
//! Sends: POST {base_url}/chat/completions

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AnalysisService, Prompt};
use crate::config::Settings;
use crate::error::ServiceError;

const SERVICE_NAME: &str = "OpenAI API";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Chat completion client built once per run from [`Settings`].
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    temperature: f64,
    endpoint: String,
}

impl OpenAiClient {
    /// Create a new client for the configured endpoint and model.
    pub fn new(settings: &Settings) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .user_agent(concat!("pyreview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            endpoint: format!("{}/chat/completions", settings.base_url),
        })
    }

    /// The full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl AnalysisService for OpenAiClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, ServiceError> {
        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "sending chat completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ServiceError::EmptyResponse)
    }
}

/// Pull the human-readable message out of an API error body.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("unknown error").to_string()
    } else {
        trimmed.to_string()
    }
}
