use crate::config::AppConfig;
use providers::disabled::DisabledProvider;
use providers::openai::{OpenAiConfig, OpenAiProvider};
use providers::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Registers the disabled provider plus OpenAI-compatible embedding and
/// generation clients, preferring the ones named in `config`.
pub fn build_registry(config: &AppConfig) -> anyhow::Result<ProviderRegistry> {
    let mut reg = ProviderRegistry::new()
        .with_embedding("disabled", Arc::new(DisabledProvider))
        .with_llm("disabled", Arc::new(DisabledProvider));

    let embedder = OpenAiProvider::new(OpenAiConfig {
        api_key: env_secret(&config.embeddings.api_key_env),
        base_url: config.embeddings.base_url.clone(),
        embedding_model: config.embeddings.model.clone(),
        chat_model: config.generation.model.clone(),
        timeout: Duration::from_secs(config.embeddings.timeout_secs),
    })?;
    reg = reg.with_embedding("openai", Arc::new(embedder));

    let generator = OpenAiProvider::new(OpenAiConfig {
        api_key: env_secret(&config.generation.api_key_env),
        base_url: config.generation.base_url.clone(),
        embedding_model: config.embeddings.model.clone(),
        chat_model: config.generation.model.clone(),
        timeout: Duration::from_secs(config.generation.timeout_secs),
    })?;
    reg = reg.with_llm("openai", Arc::new(generator));

    Ok(reg
        .set_preferred_embedding(&config.embeddings.provider)
        .set_preferred_llm(&config.generation.provider))
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var_os(name)
        .map(|v| v.to_string_lossy().trim().to_string())
        .filter(|v| !v.is_empty())
}
