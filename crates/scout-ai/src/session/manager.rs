//! ChatSession struct and transcript access.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use scout_common::SessionId;

use crate::agent::Agent;
use crate::thought::{discard_thoughts, ThoughtObserver};
use crate::transcript::Transcript;
use crate::Message;

use super::types::{TurnState, TurnStateHandle};

/// One interactive conversation: its transcript, the agent that answers
/// it, and the observer that receives live thoughts.
///
/// Turns take `&mut self`, so a session has a single writer. Hosts that
/// serve several users keep one `ChatSession` per session id.
pub struct ChatSession {
    pub(super) id: SessionId,
    pub(super) transcript: Transcript,
    pub(super) agent: Arc<dyn Agent>,
    pub(super) observer: ThoughtObserver,
    pub(super) in_progress: Arc<AtomicBool>,
}

impl ChatSession {
    /// Start a session whose transcript holds only `greeting`.
    pub fn initialize(agent: Arc<dyn Agent>, greeting: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            transcript: Transcript::seeded(greeting),
            agent,
            observer: discard_thoughts(),
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_observer(mut self, observer: ThoughtObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The transcript as of now.
    pub fn history(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> TurnState {
        self.state_handle().get()
    }

    pub fn state_handle(&self) -> TurnStateHandle {
        TurnStateHandle(self.in_progress.clone())
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("messages", &self.transcript.len())
            .field("state", &self.state())
            .finish()
    }
}
