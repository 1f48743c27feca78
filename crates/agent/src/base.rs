//! The agent capability and its LLM-backed implementation.
//!
//! An [`Agent`] can turn a prompt into text and pull code out of text.
//! Role agents (planner, coder, reviewer) wrap one and decide what to read
//! from and post to the blackboard.

use std::sync::Arc;

use agentboard_core::error::{AgentError, Result};
use agentboard_core::provider::{ChatMessage, Provider, ProviderRequest};
use async_trait::async_trait;
use tracing::debug;

use crate::extract;

/// A participant that can generate text.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Identifier used as the sender of everything this agent posts.
    fn name(&self) -> &str;

    /// Produce text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Pull a fenced code block out of free text.
    fn extract_code(&self, text: &str) -> String {
        extract::extract_code(text)
    }
}

/// An agent whose text comes from an LLM provider.
pub struct LlmAgent {
    name: String,
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    system_prompt: String,
}

impl LlmAgent {
    pub fn new(
        name: impl Into<String>,
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(prompt),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            agent = %self.name,
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars = prompt.len(),
            "Calling provider"
        );

        let response = self.provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(AgentError::EmptyResponse {
                agent: self.name.clone(),
            }
            .into());
        }

        if let Some(usage) = response.usage {
            debug!(agent = %self.name, tokens = usage.total_tokens, "Provider responded");
        }

        Ok(response.content)
    }
}
