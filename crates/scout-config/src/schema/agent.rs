//! Hosted model and agent invocation settings.

use serde::{Deserialize, Serialize};

/// Chat-completions endpoint used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSchemaConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// OpenAI-compatible `/chat/completions` URL.
    pub api_url: String,
    /// Environment variable holding the API key.
    pub credential_env: String,
    pub streaming: bool,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    pub max_tokens: u32,
    /// Upper bound on model-requested tool-call rounds per turn (1-25).
    pub max_tool_rounds: u32,
    /// Upper bound on one agent invocation, in seconds (1-600).
    pub turn_timeout_secs: u32,
}

impl Default for AgentSchemaConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".into(),
            api_url: DEFAULT_API_URL.into(),
            credential_env: "GROQ_API_KEY".into(),
            streaming: true,
            temperature: 0.7,
            max_tokens: 1024,
            max_tool_rounds: 6,
            turn_timeout_secs: 60,
        }
    }
}
