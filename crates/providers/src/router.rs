//! Provider router — selects the LLM provider the agents talk to.
//!
//! Handles provider creation from config and lookup by name.

use std::collections::HashMap;
use std::sync::Arc;
use agentboard_config::AppConfig;
use agentboard_core::error::ProviderError;
use agentboard_core::provider::Provider;
use tracing::debug;
use crate::openai_compat::OpenAiCompatProvider;

/// Routes LLM requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Build providers from configuration.
///
/// Every `[providers.<name>]` table becomes an OpenAI-compatible provider.
/// The default provider is always registered, even without its own table.
/// A provider with no `api_url` whose name is not a well-known service is
/// rejected with [`ProviderError::NotConfigured`].
pub fn build_from_config(config: &AppConfig) -> Result<ProviderRouter, ProviderError> {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = resolve_base_url(name, provider_config.api_url.as_deref())?;

        debug!(provider = %name, base_url = %base_url, "Registering provider");
        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::new(name, base_url, api_key)?),
        );
    }

    if router.get(&config.default_provider).is_none() {
        let name = &config.default_provider;
        let base_url = resolve_base_url(name, None)?;
        let api_key = config.api_key.clone().unwrap_or_default();

        debug!(provider = %name, base_url = %base_url, "Registering default provider");
        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::new(name, base_url, api_key)?),
        );
    }

    Ok(router)
}

fn resolve_base_url(name: &str, api_url: Option<&str>) -> Result<String, ProviderError> {
    match api_url.or_else(|| default_base_url(name)) {
        Some(url) => Ok(url.to_string()),
        None => Err(ProviderError::NotConfigured(format!(
            "no api_url set for provider '{name}' and no known endpoint for it"
        ))),
    }
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> Option<&'static str> {
    let url = match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1",
        "openai" => "https://api.openai.com/v1",
        "ollama" => "http://localhost:11434/v1",
        "deepseek" => "https://api.deepseek.com/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "together" => "https://api.together.xyz/v1",
        "vllm" => "http://localhost:8000/v1",
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1",
        _ => return None,
    };
    Some(url)
}
