//! The turn loop: validate, resolve prompt, append, invoke, append.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use scout_common::new_correlation_id;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::agent::{AgentConfig, AgentRequest};
use crate::tools::ToolSet;
use crate::Message;

use super::manager::ChatSession;
use super::types::{TurnError, TurnGuard};

impl ChatSession {
    /// Run one conversational turn.
    ///
    /// On success the user message and the agent's reply are both appended
    /// and the reply is returned. Precondition failures (`EmptyUtterance`,
    /// `MissingCredential`, `PromptResolution`) leave the transcript
    /// untouched. Once the user message is appended it stays, even when
    /// the agent fails, times out, panics, or the future is dropped.
    pub async fn submit_user_turn(
        &mut self,
        utterance: &str,
        config: &AgentConfig,
        tools: &ToolSet,
    ) -> Result<Message, TurnError> {
        if utterance.trim().is_empty() {
            return Err(TurnError::EmptyUtterance);
        }
        if !config.credential.is_present() {
            warn!(session = %self.id, "Turn rejected: no credential");
            return Err(TurnError::MissingCredential);
        }

        let span = info_span!("turn", session = %self.id, turn = %new_correlation_id());
        self.run_turn(utterance, config, tools).instrument(span).await
    }

    async fn run_turn(
        &mut self,
        utterance: &str,
        config: &AgentConfig,
        tools: &ToolSet,
    ) -> Result<Message, TurnError> {
        let _guard = TurnGuard::enter(&self.in_progress);

        let system_prompt = config.prompt.resolve().await.map_err(|e| {
            warn!(error = %e, "System prompt unavailable");
            TurnError::PromptResolution {
                cause: e.to_string(),
            }
        })?;

        self.transcript.push(Message::user(utterance));
        debug!(
            messages = self.transcript.len(),
            model = %config.model,
            streaming = config.streaming,
            "Invoking agent"
        );

        let request = AgentRequest {
            transcript: self.transcript.messages(),
            system_prompt: &system_prompt,
            tools,
            credential: &config.credential,
            model: &config.model,
            streaming: config.streaming,
        };
        let call = AssertUnwindSafe(self.agent.invoke(request, &*self.observer)).catch_unwind();

        let outcome = match config.turn_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    let err =
                        TurnError::agent(format!("no reply within {}s", limit.as_secs_f64()));
                    error!(kind = err.kind(), cause = ?err.cause(), "Turn failed");
                    return Err(err);
                }
            },
            None => call.await,
        };

        let reply = match outcome {
            Ok(Ok(text)) if text.trim().is_empty() => {
                Err(TurnError::agent("agent returned an empty reply"))
            }
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(TurnError::agent(e.to_string())),
            Err(payload) => Err(TurnError::agent(format!(
                "agent panicked: {}",
                panic_message(payload.as_ref())
            ))),
        };

        match reply {
            Ok(text) => {
                let message = Message::assistant(text);
                self.transcript.push(message.clone());
                info!(messages = self.transcript.len(), "Turn completed");
                Ok(message)
            }
            Err(err) => {
                error!(kind = err.kind(), cause = ?err.cause(), "Turn failed");
                Err(err)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
