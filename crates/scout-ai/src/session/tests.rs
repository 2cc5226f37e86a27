use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::agent::{Agent, AgentConfig, AgentRequest, Credential};
use crate::prompt::{PromptHub, PromptSource};
use crate::thought::Thought;
use crate::tools::{Tool, ToolSet};
use crate::{AiError, Message, Role};

use super::*;

const GREETING: &str = "Hi, I'm a research agent. How can I help you?";

struct NullTool;

#[async_trait]
impl Tool for NullTool {
    async fn run(&self, _query: &str) -> Result<String, AiError> {
        Ok(String::new())
    }
}

fn tools() -> ToolSet {
    ToolSet::new(Arc::new(NullTool), Arc::new(NullTool), Arc::new(NullTool))
}

fn config() -> AgentConfig {
    AgentConfig::new("llama-3.1-8b-instant", PromptSource::literal("be helpful"))
        .with_credential(Credential::new("gsk_test"))
}

/// What the scripted agent saw on one invocation.
#[derive(Debug, Clone)]
struct Seen {
    transcript: Vec<Message>,
    system_prompt: String,
    tool_names: Vec<String>,
}

/// Replies `"echo: <last user message>"` after emitting `thoughts` thoughts.
#[derive(Default)]
struct ScriptedAgent {
    thoughts: usize,
    seen: Mutex<Vec<Seen>>,
}

impl ScriptedAgent {
    fn with_thoughts(thoughts: usize) -> Self {
        Self {
            thoughts,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn invoke(
        &self,
        request: AgentRequest<'_>,
        on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<String, AiError> {
        self.seen.lock().unwrap().push(Seen {
            transcript: request.transcript.to_vec(),
            system_prompt: request.system_prompt.to_string(),
            tool_names: request.tools.iter().map(|t| t.name().to_string()).collect(),
        });
        for i in 0..self.thoughts {
            on_thought(Thought::ToolCall {
                tool: "wiki".into(),
                input: format!("step {i}"),
            });
        }
        let last = request
            .transcript
            .last()
            .map(Message::content)
            .unwrap_or_default();
        Ok(format!("echo: {last}"))
    }
}

/// Always replies with the same fixed result.
struct FixedAgent(Result<&'static str, fn() -> AiError>);

#[async_trait]
impl Agent for FixedAgent {
    async fn invoke(
        &self,
        _request: AgentRequest<'_>,
        _on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<String, AiError> {
        match &self.0 {
            Ok(text) => Ok(text.to_string()),
            Err(make) => Err(make()),
        }
    }
}

struct PanickingAgent;

#[async_trait]
impl Agent for PanickingAgent {
    async fn invoke(
        &self,
        _request: AgentRequest<'_>,
        _on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<String, AiError> {
        panic!("malformed tool call");
    }
}

/// Never finishes on its own.
struct StalledAgent;

#[async_trait]
impl Agent for StalledAgent {
    async fn invoke(
        &self,
        _request: AgentRequest<'_>,
        _on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<String, AiError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".into())
    }
}

fn roles(history: &[Message]) -> Vec<Role> {
    history.iter().map(Message::role).collect()
}

#[test]
fn initialize_seeds_single_greeting() {
    let session = ChatSession::initialize(Arc::new(ScriptedAgent::default()), GREETING);
    assert_eq!(session.history(), [Message::assistant(GREETING)]);
    assert_eq!(session.state(), TurnState::AwaitingTurn);
}

#[tokio::test]
async fn hello_scenario() {
    let agent = Arc::new(FixedAgent(Ok("Hi there")));
    let mut session = ChatSession::initialize(agent, GREETING);

    let reply = session
        .submit_user_turn("Hello", &config(), &tools())
        .await
        .unwrap();

    assert_eq!(reply, Message::assistant("Hi there"));
    assert_eq!(
        session.history(),
        [
            Message::assistant(GREETING),
            Message::user("Hello"),
            Message::assistant("Hi there"),
        ]
    );
}

#[tokio::test]
async fn successful_turns_alternate_and_grow_by_two() {
    let agent = Arc::new(ScriptedAgent::default());
    let mut session = ChatSession::initialize(agent.clone(), GREETING);

    for n in 1..=5 {
        session
            .submit_user_turn(&format!("question {n}"), &config(), &tools())
            .await
            .unwrap();
        assert_eq!(session.history().len(), 1 + 2 * n);
    }

    let expected: Vec<Role> = std::iter::once(Role::Assistant)
        .chain((0..5).flat_map(|_| [Role::User, Role::Assistant]))
        .collect();
    assert_eq!(roles(session.history()), expected);
    assert_eq!(session.history()[10].content(), "echo: question 5");
}

#[tokio::test]
async fn agent_sees_full_transcript_and_prompt() {
    let agent = Arc::new(ScriptedAgent::default());
    let mut session = ChatSession::initialize(agent.clone(), GREETING);

    session.submit_user_turn("one", &config(), &tools()).await.unwrap();
    session.submit_user_turn("two", &config(), &tools()).await.unwrap();

    let calls = agent.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].transcript.len(), 2);
    assert_eq!(calls[1].transcript.len(), 4);
    assert_eq!(calls[1].transcript.last(), Some(&Message::user("two")));
    assert_eq!(calls[1].system_prompt, "be helpful");
}

#[tokio::test]
async fn missing_credential_leaves_history_untouched() {
    let agent = Arc::new(ScriptedAgent::default());
    let mut session = ChatSession::initialize(agent.clone(), GREETING);

    for blank in ["", "   "] {
        let config = config().with_credential(Credential::new(blank));
        let err = session
            .submit_user_turn("Hello", &config, &tools())
            .await
            .unwrap_err();
        assert_eq!(err, TurnError::MissingCredential);
    }

    assert_eq!(session.history(), [Message::assistant(GREETING)]);
    assert!(agent.calls().is_empty());
}

#[tokio::test]
async fn empty_utterance_is_rejected_without_mutation() {
    let mut session = ChatSession::initialize(Arc::new(ScriptedAgent::default()), GREETING);
    let err = session
        .submit_user_turn(" \n", &config(), &tools())
        .await
        .unwrap_err();
    assert_eq!(err, TurnError::EmptyUtterance);
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn agent_error_keeps_only_user_message() {
    let agent = Arc::new(FixedAgent(Err(|| AiError::ApiError("HTTP 500".into()))));
    let mut session = ChatSession::initialize(agent, GREETING);

    let err = session
        .submit_user_turn("X", &config(), &tools())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "agent_invocation_failed");
    assert!(err.cause().unwrap().contains("HTTP 500"));
    assert_eq!(
        session.history(),
        [Message::assistant(GREETING), Message::user("X")]
    );
    assert_eq!(session.state(), TurnState::AwaitingTurn);
}

#[tokio::test]
async fn agent_timeout_error_is_invocation_failure() {
    let agent = Arc::new(FixedAgent(Err(|| AiError::Timeout)));
    let mut session = ChatSession::initialize(agent, GREETING);

    let err = session
        .submit_user_turn("X", &config(), &tools())
        .await
        .unwrap_err();

    assert!(matches!(err, TurnError::AgentInvocationFailed { .. }));
    assert_eq!(
        session.history(),
        [Message::assistant(GREETING), Message::user("X")]
    );
}

#[tokio::test(start_paused = true)]
async fn slow_agent_hits_turn_timeout() {
    let mut session = ChatSession::initialize(Arc::new(StalledAgent), GREETING);
    let config = config().with_turn_timeout(Some(Duration::from_secs(5)));

    let err = session
        .submit_user_turn("X", &config, &tools())
        .await
        .unwrap_err();

    assert!(matches!(err, TurnError::AgentInvocationFailed { .. }));
    assert_eq!(
        session.history(),
        [Message::assistant(GREETING), Message::user("X")]
    );
    assert_eq!(session.state(), TurnState::AwaitingTurn);
}

#[tokio::test]
async fn panicking_agent_is_contained() {
    let mut session = ChatSession::initialize(Arc::new(PanickingAgent), GREETING);

    let err = session
        .submit_user_turn("X", &config(), &tools())
        .await
        .unwrap_err();

    assert!(err.cause().unwrap().contains("malformed tool call"));
    assert_eq!(session.history().len(), 2);

    // The session stays usable afterwards.
    let err = session
        .submit_user_turn("Y", &config(), &tools())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "agent_invocation_failed");
    assert_eq!(session.history().len(), 3);
}

#[tokio::test]
async fn blank_reply_is_not_appended() {
    let mut session = ChatSession::initialize(Arc::new(FixedAgent(Ok("  "))), GREETING);
    let err = session
        .submit_user_turn("X", &config(), &tools())
        .await
        .unwrap_err();
    assert!(matches!(err, TurnError::AgentInvocationFailed { .. }));
    assert_eq!(roles(session.history()), [Role::Assistant, Role::User]);
}

#[tokio::test(start_paused = true)]
async fn dropped_turn_keeps_user_message() {
    let mut session = ChatSession::initialize(Arc::new(StalledAgent), GREETING);
    let config = config().with_turn_timeout(None);
    let tools = tools();

    let outer = tokio::time::timeout(
        Duration::from_secs(1),
        session.submit_user_turn("X", &config, &tools),
    )
    .await;
    assert!(outer.is_err());

    assert_eq!(
        session.history(),
        [Message::assistant(GREETING), Message::user("X")]
    );
    assert_eq!(session.state(), TurnState::AwaitingTurn);
}

#[tokio::test]
async fn agent_always_gets_the_fixed_tool_set() {
    let agent = Arc::new(ScriptedAgent::default());
    let mut session = ChatSession::initialize(agent.clone(), GREETING);
    let tools = tools();

    for utterance in ["search the web", "tell me about arxiv papers", "wiki: Rust"] {
        session
            .submit_user_turn(utterance, &config(), &tools)
            .await
            .unwrap();
    }

    for call in agent.calls() {
        assert_eq!(call.tool_names, ["search", "wiki", "arxiv"]);
    }
}

#[tokio::test]
async fn thoughts_reach_observer_but_not_history() {
    for count in [0, 1, 7] {
        let agent = Arc::new(ScriptedAgent::with_thoughts(count));
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let mut session = ChatSession::initialize(agent, GREETING)
            .with_observer(Arc::new(move |t: Thought| sink.lock().unwrap().push(t)));

        session.submit_user_turn("Q", &config(), &tools()).await.unwrap();

        assert_eq!(received.lock().unwrap().len(), count);
        assert_eq!(session.history().len(), 3);
        assert!(session
            .history()
            .iter()
            .all(|m| !m.content().contains("step")));
    }
}

#[tokio::test]
async fn state_is_in_progress_only_during_a_turn() {
    let agent = Arc::new(ScriptedAgent::with_thoughts(1));
    let session = ChatSession::initialize(agent, GREETING);
    let handle = session.state_handle();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = observed.clone();
    let mut session = session.with_observer(Arc::new(move |_: Thought| {
        sink.lock().unwrap().push(handle.get())
    }));

    session.submit_user_turn("Q", &config(), &tools()).await.unwrap();

    assert_eq!(*observed.lock().unwrap(), [TurnState::TurnInProgress]);
    assert_eq!(session.state(), TurnState::AwaitingTurn);
}

/// Fails the first fetch, then serves a template.
struct FlakyHub {
    calls: AtomicUsize,
}

#[async_trait]
impl PromptHub for FlakyHub {
    async fn fetch(&self, _name: &str) -> Result<String, AiError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(AiError::PromptError("HTTP 503".into()))
        } else {
            Ok("You are a research assistant.".into())
        }
    }
}

#[tokio::test]
async fn prompt_failure_aborts_before_agent_and_recovers() {
    let agent = Arc::new(ScriptedAgent::default());
    let mut session = ChatSession::initialize(agent.clone(), GREETING);
    let hub = Arc::new(FlakyHub {
        calls: AtomicUsize::new(0),
    });
    let config = AgentConfig::new("m", PromptSource::hub(hub, "hwchase17/react-chat"))
        .with_credential(Credential::new("gsk_test"));

    let err = session
        .submit_user_turn("Hello", &config, &tools())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "prompt_resolution");
    assert_eq!(session.history().len(), 1);
    assert!(agent.calls().is_empty());

    session
        .submit_user_turn("Hello", &config, &tools())
        .await
        .unwrap();
    assert_eq!(session.history().len(), 3);
    assert_eq!(agent.calls()[0].system_prompt, "You are a research assistant.");
}
