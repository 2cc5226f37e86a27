//! Configuration schema types for Scout.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults of the research agent.

mod agent;
mod prompt;
mod session;
mod system;
mod tools;

pub use agent::*;
pub use prompt::*;
pub use session::*;
pub use system::*;
pub use tools::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Scout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ScoutConfig {
    pub agent: AgentSchemaConfig,
    pub prompt: PromptConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_agent_targets_groq() {
        let config = ScoutConfig::default();
        assert_eq!(config.agent.model, "llama-3.1-8b-instant");
        assert_eq!(config.agent.api_url, DEFAULT_API_URL);
        assert_eq!(config.agent.credential_env, "GROQ_API_KEY");
        assert!(config.agent.streaming);
        assert_eq!(config.agent.turn_timeout_secs, 60);
    }

    #[test]
    fn default_prompt_is_literal() {
        let config = ScoutConfig::default();
        assert_eq!(config.prompt.source, PromptSourceKind::Literal);
        assert!(config.prompt.text.starts_with("You are a helpful research assistant."));
        assert_eq!(config.prompt.hub_name, "hwchase17/react-chat");
    }

    #[test]
    fn default_session_and_display() {
        let config = ScoutConfig::default();
        assert_eq!(
            config.session.greeting,
            "Hi, I'm a research agent. How can I help you?"
        );
        assert!(config.display.expand_thoughts);
        assert_eq!(config.display.max_thoughts, 6);
        assert!(!config.display.collapse_completed);
    }

    #[test]
    fn default_tool_endpoints_carry_query_placeholder() {
        let config = ScoutConfig::default();
        for tool in [&config.tools.search, &config.tools.wiki, &config.tools.arxiv] {
            assert!(tool.endpoint.contains("{query}"), "{}", tool.endpoint);
            assert_eq!(tool.max_chars, 1500);
        }
    }

    #[test]
    fn prompt_source_deserializes_lowercase() {
        let config: ScoutConfig = toml::from_str(
            r#"
[prompt]
source = "hub"
"#,
        )
        .unwrap();
        assert_eq!(config.prompt.source, PromptSourceKind::Hub);
        // untouched fields keep defaults
        assert_eq!(config.prompt.hub_name, "hwchase17/react-chat");
    }

    #[test]
    fn log_level_directive() {
        assert_eq!(LogLevel::default().directive(), "scout=info");
        assert_eq!(LogLevel::Debug.directive(), "scout=debug");
    }
}
