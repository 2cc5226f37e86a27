//! Intermediate "thought" events emitted by an agent during a turn.
//!
//! Thoughts are forwarded live to an observer and never stored in the
//! transcript.

use std::sync::Arc;

/// One intermediate reasoning or tool trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thought {
    /// Model text as it streams in.
    Text(String),
    /// The model asked a tool to look something up.
    ToolCall { tool: String, input: String },
    /// A tool answered.
    ToolOutput { tool: String, output: String },
    /// A tool failed; the agent carries on with the error as the result.
    ToolError { tool: String, error: String },
}

impl Thought {
    /// Short label for compact rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Thought::Text(_) => "text",
            Thought::ToolCall { .. } => "tool call",
            Thought::ToolOutput { .. } => "tool output",
            Thought::ToolError { .. } => "tool error",
        }
    }

    /// The tool this thought concerns, if any.
    pub fn tool(&self) -> Option<&str> {
        match self {
            Thought::Text(_) => None,
            Thought::ToolCall { tool, .. }
            | Thought::ToolOutput { tool, .. }
            | Thought::ToolError { tool, .. } => Some(tool),
        }
    }
}

/// Receives thoughts as they arrive. Called synchronously from inside
/// the agent invocation, so it should return quickly.
pub type ThoughtObserver = Arc<dyn Fn(Thought) + Send + Sync>;

/// An observer that drops every thought.
pub fn discard_thoughts() -> ThoughtObserver {
    Arc::new(|_| {})
}
