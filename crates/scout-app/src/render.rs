//! Terminal rendering of thoughts, replies, and turn notices.

use scout_ai::{Message, Role, Thought, TurnError};
use scout_config::schema::DisplayConfig;

pub const FAILURE_NOTICE: &str =
    "Sorry, something went wrong. Please check your API key or try again.";
pub const MISSING_KEY_NOTICE: &str =
    "Please add your Groq API Key with /key <value> to continue.";
pub const PROMPT_NOTICE: &str =
    "The system prompt could not be loaded right now. Please try again shortly.";

/// Longest tool output shown when thoughts are expanded.
const OUTPUT_PREVIEW_CHARS: usize = 200;

/// What the user sees for a failed turn. Raw causes stay in the logs.
pub fn notice_for(err: &TurnError) -> Option<&'static str> {
    match err {
        TurnError::EmptyUtterance => None,
        TurnError::MissingCredential => Some(MISSING_KEY_NOTICE),
        TurnError::PromptResolution { .. } => Some(PROMPT_NOTICE),
        TurnError::AgentInvocationFailed { .. } => Some(FAILURE_NOTICE),
    }
}

pub fn format_message(message: &Message) -> String {
    let who = match message.role() {
        Role::User => "you",
        Role::Assistant => "scout",
    };
    format!("{who}> {}", message.content())
}

/// Formats the live thought stream of one turn.
///
/// Streamed text is printed as it arrives. Tool steps count against
/// `max_thoughts`; steps past the limit are tallied instead of shown.
#[derive(Debug)]
pub struct ThoughtRenderer {
    expand: bool,
    max_thoughts: usize,
    collapse_completed: bool,
    shown: usize,
    hidden: usize,
    /// Text streamed since the last tool step.
    streamed: String,
}

impl ThoughtRenderer {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            expand: display.expand_thoughts,
            max_thoughts: display.max_thoughts as usize,
            collapse_completed: display.collapse_completed,
            shown: 0,
            hidden: 0,
            streamed: String::new(),
        }
    }

    pub fn begin_turn(&mut self) {
        self.shown = 0;
        self.hidden = 0;
        self.streamed.clear();
    }

    /// Text to print for `thought`, if any. No trailing newline is added
    /// for streamed text.
    pub fn render(&mut self, thought: &Thought) -> Option<String> {
        if let Thought::Text(chunk) = thought {
            let prefix = if self.streamed.is_empty() { "scout> " } else { "" };
            self.streamed.push_str(chunk);
            return Some(format!("{prefix}{chunk}"));
        }

        // Text before a tool step was the model thinking aloud.
        let break_line = if self.streamed.is_empty() { "" } else { "\n" };
        self.streamed.clear();

        if self.shown >= self.max_thoughts {
            self.hidden += 1;
            return (!break_line.is_empty()).then(|| break_line.to_string());
        }
        self.shown += 1;

        let line = match (thought, self.expand) {
            (Thought::ToolCall { tool, input }, true) => format!("  > {tool}: {input}"),
            (Thought::ToolOutput { tool, output }, true) => {
                format!("  < {tool}: {}", preview(output))
            }
            (Thought::ToolError { tool, error }, true) => format!("  ! {tool}: {error}"),
            (thought, _) => format!("  * {}", compact(thought)),
        };
        Some(format!("{break_line}{line}\n"))
    }

    /// Closing output for a turn: a summary of the steps and the reply
    /// unless it was already streamed.
    pub fn finish_turn(&mut self, reply: Option<&Message>) -> String {
        let mut out = String::new();
        if !self.streamed.is_empty() {
            out.push('\n');
        }
        if self.hidden > 0 {
            out.push_str(&format!("  ({} more steps hidden)\n", self.hidden));
        }
        let steps = self.shown + self.hidden;
        if self.collapse_completed && steps > 0 {
            out.push_str(&format!("  Complete ({steps} steps)\n"));
        }
        if let Some(message) = reply {
            if self.streamed.trim() != message.content().trim() {
                out.push_str(&format_message(message));
                out.push('\n');
            }
        }
        self.begin_turn();
        out
    }
}

fn compact(thought: &Thought) -> String {
    match thought.tool() {
        Some(tool) => format!("{} ({tool})", thought.label()),
        None => thought.label().to_string(),
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(OUTPUT_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}
