use crate::{CompletionRequest, EmbedResponse, EmbeddingProvider, LlmProvider, ProviderError};

/// Registered under `"disabled"` for deployments with no embedding or
/// completion backend. Every call fails, so index builds stop before
/// writing and answers degrade to text or the fallback responder.
#[derive(Debug, Default)]
pub struct DisabledProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for DisabledProvider {
    async fn embed(&self, _texts: &[String]) -> Result<EmbedResponse, ProviderError> {
        Err(ProviderError::Disabled("embeddings"))
    }
}

#[async_trait::async_trait]
impl LlmProvider for DisabledProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Disabled("generation"))
    }
}
