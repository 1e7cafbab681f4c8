//! Remote model review of code snippets.
//!
//! `request_analysis` turns a snippet into a [`Prompt`], sends it through an
//! [`AnalysisService`] and returns an [`Analysis`]. Service failures never
//! escape as errors: they come back as [`Analysis::Failed`] so the caller can
//! print them and move on to the next entity.

mod openai;
mod prompt;

pub use openai::OpenAiClient;
pub use prompt::{Prompt, SECTION_HEADINGS, SYSTEM_INSTRUCTION};

use std::borrow::Cow;

use async_trait::async_trait;

use crate::error::ServiceError;

/// A text-generation backend that answers one prompt with one reply.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Human-readable service name used in error messages.
    fn name(&self) -> &str;

    /// Send the prompt and return the reply text verbatim.
    async fn complete(&self, prompt: &Prompt) -> Result<String, ServiceError>;
}

/// Outcome of one review request.
#[derive(Debug)]
pub enum Analysis {
    /// The model's reply, unparsed.
    Completed(String),
    /// The request failed; the run continues with the next entity.
    Failed { service: String, error: ServiceError },
}

impl Analysis {
    pub fn is_failed(&self) -> bool {
        matches!(self, Analysis::Failed { .. })
    }

    /// Plain text shown in the report body.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Analysis::Completed(text) => Cow::Borrowed(text),
            Analysis::Failed { service, error } => {
                Cow::Owned(format!("Error communicating with {}: {}", service, error))
            }
        }
    }
}

/// Ask `service` to review one snippet.
pub async fn request_analysis<S>(service: &S, snippet: &str) -> Analysis
where
    S: AnalysisService + ?Sized,
{
    let prompt = Prompt::for_snippet(snippet);

    match service.complete(&prompt).await {
        Ok(text) => Analysis::Completed(text),
        Err(error) => {
            tracing::warn!(service = service.name(), %error, "analysis request failed");
            Analysis::Failed {
                service: service.name().to_string(),
                error,
            }
        }
    }
}
