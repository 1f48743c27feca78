//! Error types for the Agentboard domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! The blackboard itself never fails; these cover the collaborators around it.

use crate::message::MessageKind;
use thiserror::Error;

/// The top-level error type for all Agentboard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Agent errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("Agent {agent} received an empty response")]
    EmptyResponse { agent: String },

    #[error("Agent {agent} needs a {kind} message but the blackboard has none")]
    MissingInput { agent: String, kind: MessageKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn agent_error_names_the_missing_kind() {
        let err = Error::Agent(AgentError::MissingInput {
            agent: "reviewer".into(),
            kind: MessageKind::Code,
        });
        assert!(err.to_string().contains("reviewer"));
        assert!(err.to_string().contains("code"));
    }
}
