//! Hosted agent configuration.

use std::time::Duration;

/// Endpoint and sampling settings for `HostedAgent`.
///
/// The credential and model name travel with each request, so this holds
/// no secrets.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedConfig {
    /// Full chat-completions URL.
    pub api_url: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Rounds of tool calls allowed before the model must answer.
    pub max_tool_rounds: u32,
    /// HTTP timeout for one completion request.
    pub request_timeout: Duration,
}

impl HostedConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            temperature: 0.7,
            max_tokens: 1024,
            max_tool_rounds: 6,
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_tool_rounds(mut self, rounds: u32) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
