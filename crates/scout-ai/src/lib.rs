//! Chat orchestration core for Scout.
//!
//! Provides:
//! - `ChatSession`: append-only transcript and one-turn-at-a-time agent calls
//! - The `Agent`, `Tool`, and `PromptHub` collaborator seams
//! - A hosted agent over OpenAI-compatible chat completions (SSE streaming)
//! - Remote lookup tools for the fixed `search` / `wiki` / `arxiv` set
//! - Token usage tracking

pub mod agent;
pub mod hosted;
pub mod prompt;
pub mod session;
pub mod streaming;
pub mod thought;
pub mod token_tracker;
pub mod tools;
pub mod transcript;

pub use agent::{Agent, AgentConfig, AgentRequest, Credential};
pub use hosted::{HostedAgent, HostedConfig};
pub use prompt::{HttpPromptHub, PromptHub, PromptSource};
pub use session::{ChatSession, TurnError, TurnState, TurnStateHandle};
pub use thought::{Thought, ThoughtObserver};
pub use token_tracker::TokenTracker;
pub use tools::{RemoteLookupTool, Tool, ToolDefinition, ToolKind, ToolSet, ToolSpec};
pub use transcript::Transcript;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Failures raised by collaborators (model endpoint, tools, prompt hub).
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Tool error ({tool}): {message}")]
    ToolError { tool: String, message: String },
    #[error("Prompt error: {0}")]
    PromptError(String),
}

impl From<AiError> for scout_common::ScoutError {
    fn from(err: AiError) -> Self {
        scout_common::ScoutError::Ai(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_role() {
        let m = Message::user("Hello");
        assert_eq!(m.role(), Role::User);
        assert_eq!(m.content(), "Hello");

        let m = Message::assistant("Hi there");
        assert_eq!(m.role(), Role::Assistant);
        assert_eq!(m.content(), "Hi there");
    }

    #[test]
    fn message_serializes_with_lowercase_role() {
        let json = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "hi" }));
    }

    #[test]
    fn token_usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 5,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn ai_error_display() {
        let err = AiError::ToolError {
            tool: "wiki".into(),
            message: "HTTP 404".into(),
        };
        assert_eq!(err.to_string(), "Tool error (wiki): HTTP 404");
        assert_eq!(AiError::Timeout.to_string(), "Timeout");
    }

    #[test]
    fn ai_error_converts_to_scout_error() {
        let err: scout_common::ScoutError = AiError::RateLimited.into();
        assert_eq!(err.to_string(), "ai error: Rate limited");
    }
}
