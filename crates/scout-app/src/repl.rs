//! Interactive chat loop over stdin/stdout.

use scout_ai::Credential;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::boot::Shell;
use crate::render::{format_message, notice_for, MISSING_KEY_NOTICE};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the agent.
    Say(String),
    Key(String),
    History,
    Usage,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Plain text is passed through untrimmed so the transcript keeps what
/// the user typed.
pub fn parse_command(raw: &str) -> Command {
    let line = raw.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if !line.starts_with('/') {
        return Command::Say(raw.to_string());
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match name {
        "/key" => Command::Key(rest.trim().to_string()),
        "/history" => Command::History,
        "/usage" => Command::Usage,
        "/help" | "/h" => Command::Help,
        "/quit" | "/exit" | "/q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

const HELP: &str = "\
Commands:
  /key <value>  Set the API key for this session
  /history      Show the conversation so far
  /usage        Show token usage
  /help         Show this help
  /quit         Exit";

/// Warm the prompt cache so a broken hub shows up before the first turn.
pub async fn prefetch_prompt(shell: &Shell) {
    if shell.agent_config.prompt.is_resolved() {
        return;
    }
    match shell.agent_config.prompt.resolve().await {
        Ok(_) => debug!("System prompt prefetched"),
        Err(e) => warn!(error = %e, "System prompt prefetch failed; will retry on first turn"),
    }
}

pub async fn run(mut shell: Shell) -> scout_common::Result<()> {
    println!("{}", shell.title);
    println!("Type /help for commands, /quit to exit.\n");
    for message in shell.session.history() {
        println!("{}", format_message(message));
    }
    if !shell.agent_config.credential.is_present() {
        println!("{MISSING_KEY_NOTICE}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("you> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Empty => println!("({})", shell.placeholder),
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Unknown(name) => println!("Unknown command {name}. Type /help."),
            Command::Key(key) if key.is_empty() => println!("Usage: /key <value>"),
            Command::Key(key) => {
                shell.agent_config.set_credential(Credential::new(key));
                info!("Credential updated from shell");
                println!("API key set.");
            }
            Command::History => {
                for message in shell.session.history() {
                    println!("{}", format_message(message));
                }
            }
            Command::Usage => {
                let usage = shell.agent.usage();
                println!(
                    "{} requests, {} input + {} output = {} tokens",
                    usage.call_count(),
                    usage.total().input_tokens,
                    usage.total().output_tokens,
                    usage.total_tokens()
                );
            }
            Command::Say(text) => take_turn(&mut shell, &text).await,
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn take_turn(shell: &mut Shell, text: &str) {
    lock_renderer(shell).begin_turn();
    let result = shell
        .session
        .submit_user_turn(text, &shell.agent_config, &shell.tools)
        .await;

    let closing = lock_renderer(shell).finish_turn(result.as_ref().ok());
    print!("{closing}");
    if let Err(err) = result {
        if let Some(notice) = notice_for(&err) {
            println!("{notice}");
        }
    }
}

fn lock_renderer(shell: &Shell) -> std::sync::MutexGuard<'_, crate::render::ThoughtRenderer> {
    shell.renderer.lock().unwrap_or_else(|e| e.into_inner())
}
