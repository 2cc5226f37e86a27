//! Chat session and thought display settings.

use serde::{Deserialize, Serialize};

/// Session presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seeded assistant message that opens every transcript.
    pub greeting: String,
    pub title: String,
    pub input_placeholder: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi, I'm a research agent. How can I help you?".into(),
            title: "Scout Research Agent".into(),
            input_placeholder: "What is the latest on Llama 3.1?".into(),
        }
    }
}

/// How intermediate agent thoughts are rendered during a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print the full body of each thought instead of a one-line summary.
    pub expand_thoughts: bool,
    /// Thoughts rendered per turn before the rest are elided (0-50).
    pub max_thoughts: u32,
    /// Print a single summary line once the turn completes.
    pub collapse_completed: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            expand_thoughts: true,
            max_thoughts: 6,
            collapse_completed: false,
        }
    }
}
