//! Startup wiring: turns the loaded config and CLI flags into the tool
//! set, prompt source, hosted agent, and session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use scout_ai::{
    AgentConfig, AiError, ChatSession, Credential, HostedAgent, HostedConfig, HttpPromptHub,
    PromptSource, RemoteLookupTool, Thought, ThoughtObserver, ToolKind, ToolSet,
};
use scout_common::Result;
use scout_config::schema::{PromptSourceKind, ScoutConfig, ToolEndpointConfig};
use tracing::{debug, info};

use crate::cli::Args;
use crate::render::ThoughtRenderer;

/// Everything the shell needs for one interactive session.
pub struct Shell {
    pub session: ChatSession,
    pub agent_config: AgentConfig,
    pub tools: ToolSet,
    pub agent: Arc<HostedAgent>,
    pub renderer: Arc<Mutex<ThoughtRenderer>>,
    pub title: String,
    pub placeholder: String,
}

/// Filter directive from `--log-level`, falling back to the config.
/// A bare level applies to the scout crates only.
pub fn log_directive(flag: Option<&str>, config: Option<&ScoutConfig>) -> String {
    match flag {
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("scout={level}"),
        None => config
            .map(|c| c.logging.level.directive())
            .unwrap_or("scout=info")
            .to_string(),
    }
}

/// Credential from `--api-key`, else the configured environment variable.
pub fn resolve_credential(flag: Option<&str>, env_var: &str) -> Credential {
    match flag {
        Some(key) if !key.trim().is_empty() => Credential::new(key),
        _ => Credential::from_env(env_var),
    }
}

pub fn build_tools(config: &ScoutConfig) -> std::result::Result<ToolSet, AiError> {
    let tool = |kind: ToolKind, endpoint: &ToolEndpointConfig| {
        debug!(tool = kind.name(), endpoint = %endpoint.endpoint, "Registering tool");
        RemoteLookupTool::new(kind, endpoint.endpoint.clone(), endpoint.max_chars as usize)
    };
    Ok(ToolSet::new(
        Arc::new(tool(ToolKind::Search, &config.tools.search)?),
        Arc::new(tool(ToolKind::Wiki, &config.tools.wiki)?),
        Arc::new(tool(ToolKind::Arxiv, &config.tools.arxiv)?),
    ))
}

pub fn build_prompt(config: &ScoutConfig) -> std::result::Result<PromptSource, AiError> {
    match config.prompt.source {
        PromptSourceKind::Literal => Ok(PromptSource::literal(config.prompt.text.clone())),
        PromptSourceKind::Hub => {
            let hub = HttpPromptHub::new(config.prompt.hub_url.clone())?;
            Ok(PromptSource::hub(Arc::new(hub), config.prompt.hub_name.clone()))
        }
    }
}

pub fn build_agent_config(
    args: &Args,
    config: &ScoutConfig,
    prompt: PromptSource,
) -> AgentConfig {
    let model = args.model.clone().unwrap_or_else(|| config.agent.model.clone());
    AgentConfig::new(model, prompt)
        .with_credential(resolve_credential(
            args.api_key.as_deref(),
            &config.agent.credential_env,
        ))
        .with_streaming(config.agent.streaming && !args.no_stream)
        .with_turn_timeout(Some(Duration::from_secs(u64::from(
            config.agent.turn_timeout_secs,
        ))))
}

pub fn build_shell(args: &Args, config: &ScoutConfig) -> Result<Shell> {
    let tools = build_tools(config)?;
    let prompt = build_prompt(config)?;
    let agent_config = build_agent_config(args, config, prompt);

    let agent = Arc::new(HostedAgent::new(
        HostedConfig::new(config.agent.api_url.clone())
            .with_temperature(config.agent.temperature)
            .with_max_tokens(config.agent.max_tokens)
            .with_max_tool_rounds(config.agent.max_tool_rounds),
    )?);

    let renderer = Arc::new(Mutex::new(ThoughtRenderer::new(&config.display)));
    let session = ChatSession::initialize(agent.clone(), config.session.greeting.clone())
        .with_observer(print_thoughts(renderer.clone()));

    info!(
        session = %session.id(),
        model = %agent_config.model,
        streaming = agent_config.streaming,
        tools = ?tools.names(),
        "Session ready"
    );

    Ok(Shell {
        session,
        agent_config,
        tools,
        agent,
        renderer,
        title: config.session.title.clone(),
        placeholder: config.session.input_placeholder.clone(),
    })
}

fn print_thoughts(renderer: Arc<Mutex<ThoughtRenderer>>) -> ThoughtObserver {
    Arc::new(move |thought: Thought| {
        let text = renderer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .render(&thought);
        if let Some(text) = text {
            use std::io::Write;
            let mut out = std::io::stdout().lock();
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["scout"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn log_directive_precedence() {
        let config = ScoutConfig::default();
        assert_eq!(log_directive(None, None), "scout=info");
        assert_eq!(log_directive(None, Some(&config)), "scout=info");
        assert_eq!(log_directive(Some("debug"), Some(&config)), "scout=debug");
        assert_eq!(
            log_directive(Some("scout_ai=trace"), None),
            "scout_ai=trace"
        );
    }

    #[test]
    fn flag_credential_wins_over_env() {
        let c = resolve_credential(Some("gsk_flag"), "SCOUT_TEST_UNSET_VAR");
        assert_eq!(c.expose(), "gsk_flag");
        let c = resolve_credential(Some("  "), "SCOUT_TEST_UNSET_VAR");
        assert!(!c.is_present());
    }

    #[test]
    fn agent_config_honours_overrides() {
        let config = ScoutConfig::default();
        let cfg = build_agent_config(
            &args(&["--model", "mixtral", "--no-stream", "--api-key", "gsk_x"]),
            &config,
            PromptSource::literal("p"),
        );
        assert_eq!(cfg.model, "mixtral");
        assert!(!cfg.streaming);
        assert!(cfg.credential.is_present());
        assert_eq!(cfg.turn_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn prompt_source_follows_config() {
        let mut config = ScoutConfig::default();
        assert!(build_prompt(&config).unwrap().is_resolved());

        config.prompt.source = PromptSourceKind::Hub;
        config.prompt.hub_url = "https://prompts.example.com/v1".into();
        let prompt = build_prompt(&config).unwrap();
        assert!(!prompt.is_resolved());
    }

    #[test]
    fn shell_starts_with_greeting() {
        let config = ScoutConfig::default();
        let shell = build_shell(&args(&[]), &config).unwrap();
        assert_eq!(shell.session.history().len(), 1);
        assert_eq!(shell.tools.names(), ["search", "wiki", "arxiv"]);
    }
}
