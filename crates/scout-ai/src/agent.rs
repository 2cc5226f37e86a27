//! The agent collaborator seam and its per-session configuration.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::prompt::PromptSource;
use crate::thought::Thought;
use crate::tools::ToolSet;
use crate::{AiError, Message};

/// Everything an agent needs for one turn.
pub struct AgentRequest<'a> {
    /// Full transcript, including the user message of this turn.
    pub transcript: &'a [Message],
    pub system_prompt: &'a str,
    pub tools: &'a ToolSet,
    pub credential: &'a Credential,
    pub model: &'a str,
    pub streaming: bool,
}

/// Runs one conversational turn and returns the final assistant text.
///
/// Tool calls, reasoning steps, and retries are the agent's business.
/// Intermediate thoughts go to `on_thought` while the call is running.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn invoke(
        &self,
        request: AgentRequest<'_>,
        on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<String, AiError>;
}

/// API key for the hosted model. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Read the credential from an environment variable; unset reads as empty.
    pub fn from_env(var: &str) -> Self {
        Self(std::env::var(var).unwrap_or_default())
    }

    /// True when a non-blank secret is held.
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }

    pub fn expose(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            f.write_str("Credential([REDACTED])")
        } else {
            f.write_str("Credential(<empty>)")
        }
    }
}

/// Per-session agent settings.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub credential: Credential,
    pub model: String,
    pub prompt: PromptSource,
    pub streaming: bool,
    /// Upper bound on one agent invocation. `None` waits indefinitely.
    pub turn_timeout: Option<Duration>,
}

impl AgentConfig {
    pub fn new(model: impl Into<String>, prompt: PromptSource) -> Self {
        Self {
            credential: Credential::default(),
            model: model.into(),
            prompt,
            streaming: true,
            turn_timeout: Some(Duration::from_secs(60)),
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Replace the credential, e.g. after the user enters one.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }
}
