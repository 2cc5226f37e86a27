//! Turn errors, session state, and the in-progress guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Why a turn did not produce an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("utterance is empty")]
    EmptyUtterance,
    #[error("no credential configured")]
    MissingCredential,
    #[error("system prompt could not be resolved: {cause}")]
    PromptResolution { cause: String },
    #[error("agent invocation failed: {cause}")]
    AgentInvocationFailed { cause: String },
}

impl TurnError {
    /// Stable identifier for logs and UI dispatch.
    pub fn kind(&self) -> &'static str {
        match self {
            TurnError::EmptyUtterance => "empty_utterance",
            TurnError::MissingCredential => "missing_credential",
            TurnError::PromptResolution { .. } => "prompt_resolution",
            TurnError::AgentInvocationFailed { .. } => "agent_invocation_failed",
        }
    }

    /// Underlying cause, for operators only.
    pub fn cause(&self) -> Option<&str> {
        match self {
            TurnError::PromptResolution { cause }
            | TurnError::AgentInvocationFailed { cause } => Some(cause),
            _ => None,
        }
    }

    pub(crate) fn agent(cause: impl Into<String>) -> Self {
        TurnError::AgentInvocationFailed {
            cause: cause.into(),
        }
    }
}

/// The two states a session moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingTurn,
    TurnInProgress,
}

/// Read-only view of a session's state, usable while the session itself
/// is mutably borrowed by a running turn.
#[derive(Debug, Clone)]
pub struct TurnStateHandle(pub(crate) Arc<AtomicBool>);

impl TurnStateHandle {
    pub fn get(&self) -> TurnState {
        if self.0.load(Ordering::Acquire) {
            TurnState::TurnInProgress
        } else {
            TurnState::AwaitingTurn
        }
    }
}

/// Marks a turn in progress and clears the mark on drop, so the session
/// returns to `AwaitingTurn` on every exit path including cancellation.
pub(crate) struct TurnGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> TurnGuard<'a> {
    pub(crate) fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self { flag }
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(TurnError::MissingCredential.kind(), "missing_credential");
        assert_eq!(
            TurnError::agent("boom").kind(),
            "agent_invocation_failed"
        );
    }

    #[test]
    fn cause_only_for_collaborator_failures() {
        assert_eq!(TurnError::EmptyUtterance.cause(), None);
        assert_eq!(TurnError::agent("HTTP 500").cause(), Some("HTTP 500"));
        let err = TurnError::PromptResolution {
            cause: "404".into(),
        };
        assert_eq!(err.cause(), Some("404"));
        assert_eq!(err.to_string(), "system prompt could not be resolved: 404");
    }

    #[test]
    fn guard_clears_flag_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = TurnGuard::enter(&flag);
            assert!(flag.load(Ordering::Acquire));
        }
        assert!(!flag.load(Ordering::Acquire));
    }
}
