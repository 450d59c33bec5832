//! One-shot completion call that never fails outward: any provider error is
//! turned into text the caller can show as the answer.

use crate::config::GenerationConfig;
use crate::prompt::Prompt;
use providers::{CompletionRequest, LlmProvider, ProviderError};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Completed(String),
    /// Generation was unavailable; the text explains why.
    Degraded(String),
}

impl Generation {
    pub fn text(&self) -> &str {
        match self {
            Generation::Completed(t) | Generation::Degraded(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Generation::Completed(t) | Generation::Degraded(t) => t,
        }
    }

    pub fn completed(&self) -> Option<&str> {
        match self {
            Generation::Completed(t) => Some(t),
            Generation::Degraded(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct GenerationClient {
    provider: Option<Arc<dyn LlmProvider>>,
    label: String,
    api_key_env: String,
    temperature: f32,
    max_tokens: u32,
}

impl GenerationClient {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, config: &GenerationConfig) -> Self {
        Self {
            provider,
            label: config.label.clone(),
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Single attempt, no retries.
    pub async fn generate(&self, prompt: &Prompt) -> Generation {
        let Some(provider) = &self.provider else {
            return Generation::Degraded(format!(
                "Error calling {} API: no generation provider is configured.",
                self.label
            ));
        };
        let request = CompletionRequest {
            system: prompt.system.clone(),
            prompt: prompt.user.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        match provider.complete(&request).await {
            Ok(text) => Generation::Completed(text),
            Err(ProviderError::MissingCredential(_)) => Generation::Degraded(format!(
                "{} API key is missing. Please set {} in your .env file.",
                self.label, self.api_key_env
            )),
            Err(e) => {
                warn!("Generation request failed: {}", e);
                Generation::Degraded(format!("Error calling {} API: {}", self.label, e))
            }
        }
    }
}
