//! System prompt source.

use serde::{Deserialize, Serialize};

/// Where the system prompt comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum PromptSourceKind {
    /// Use `prompt.text` as-is.
    #[default]
    Literal,
    /// Fetch `prompt.hub_name` from `prompt.hub_url` before the first turn.
    /// There is no default hub; `hub_url` must be set.
    Hub,
}

/// Prompt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub source: PromptSourceKind,
    pub text: String,
    pub hub_name: String,
    pub hub_url: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            source: PromptSourceKind::Literal,
            text: "You are a helpful research assistant. \
                   Use your tools to answer the user's question."
                .into(),
            hub_name: "hwchase17/react-chat".into(),
            hub_url: String::new(),
        }
    }
}
