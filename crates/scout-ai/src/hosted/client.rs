//! HostedAgent struct, request building, and response parsing.

use std::sync::Mutex;

use tracing::{debug, warn};

use crate::agent::AgentRequest;
use crate::token_tracker::TokenTracker;
use crate::tools::{to_openai_tool, ToolDefinition};
use crate::{AiError, TokenUsage};

use super::config::HostedConfig;

/// Upper bound on tool calls accepted from one streamed reply.
const MAX_STREAMED_TOOL_CALLS: usize = 64;

/// Agent backed by a hosted model speaking the OpenAI chat-completions
/// protocol (Groq, OpenAI, local servers).
pub struct HostedAgent {
    pub(crate) config: HostedConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) tracker: Mutex<TokenTracker>,
}

impl HostedAgent {
    pub fn new(config: HostedConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http,
            tracker: Mutex::new(TokenTracker::new()),
        })
    }

    pub fn config(&self) -> &HostedConfig {
        &self.config
    }

    /// Snapshot of token usage so far.
    pub fn usage(&self) -> TokenTracker {
        self.tracker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn record_usage(&self, model: &str, usage: &TokenUsage) {
        self.tracker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record(model, usage);
    }

    /// Build the JSON body for one completion request.
    ///
    /// `scratch` holds this turn's tool-call exchange so far; it is never
    /// written back to the transcript.
    pub(crate) fn build_request_body(
        &self,
        request: &AgentRequest<'_>,
        scratch: &[serde_json::Value],
        tools: &[ToolDefinition],
        allow_tools: bool,
    ) -> serde_json::Value {
        let mut messages = Vec::with_capacity(request.transcript.len() + scratch.len() + 1);
        if !request.system_prompt.trim().is_empty() {
            messages.push(serde_json::json!({
                "role": "system",
                "content": request.system_prompt,
            }));
        }
        for msg in request.transcript {
            messages.push(serde_json::json!({
                "role": msg.role().as_str(),
                "content": msg.content(),
            }));
        }
        messages.extend(scratch.iter().cloned());

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "stream": request.streaming,
        });

        if allow_tools && !tools.is_empty() {
            let tool_defs: Vec<_> = tools.iter().map(to_openai_tool).collect();
            body["tools"] = serde_json::json!(tool_defs);
            body["tool_choice"] = serde_json::json!("auto");
        }

        body
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<Completion, AiError> {
        let message = json["choices"]
            .get(0)
            .map(|c| &c["message"])
            .ok_or_else(|| AiError::ParseError("response has no choices".into()))?;

        let content = message["content"].as_str().unwrap_or_default().to_string();

        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| {
                calls
                    .iter()
                    .map(|c| ToolCall {
                        id: c["id"].as_str().unwrap_or_default().to_string(),
                        name: c["function"]["name"].as_str().unwrap_or_default().to_string(),
                        arguments: c["function"]["arguments"]
                            .as_str()
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Completion {
            content,
            tool_calls,
            usage: parse_usage(&json).unwrap_or_default(),
        })
    }
}

/// One model reply: text, requested tool calls, and token usage.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Completion {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
}

impl Completion {
    /// The assistant entry that records this reply's tool calls.
    pub(crate) fn assistant_entry(&self) -> serde_json::Value {
        let calls: Vec<_> = self
            .tool_calls
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "type": "function",
                    "function": { "name": c.name, "arguments": c.arguments },
                })
            })
            .collect();
        serde_json::json!({
            "role": "assistant",
            "content": self.content,
            "tool_calls": calls,
        })
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw JSON arguments as sent by the model.
    pub arguments: String,
}

impl ToolCall {
    /// The lookup text: the `query` argument, or the raw arguments when
    /// the model did not send a JSON object.
    pub fn query(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.arguments) {
            Ok(serde_json::Value::Object(map)) => map
                .get("query")
                .and_then(|q| q.as_str())
                .unwrap_or_default()
                .to_string(),
            Ok(serde_json::Value::String(s)) => s,
            _ => self.arguments.trim().to_string(),
        }
    }

    /// The `tool` message carrying this call's result.
    pub(crate) fn result_entry(&self, output: &str) -> serde_json::Value {
        serde_json::json!({
            "role": "tool",
            "tool_call_id": self.id,
            "content": output,
        })
    }
}

/// Builds a `Completion` from streamed chunks.
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    content: String,
    tool_calls: Vec<ToolCall>,
    usage: Option<TokenUsage>,
    error: Option<String>,
    malformed: Option<String>,
}

impl StreamAccumulator {
    /// Apply one `data:` payload. Returns the text delta it carried, if any.
    pub(crate) fn apply(&mut self, data: &str) -> Option<String> {
        let json: serde_json::Value = match serde_json::from_str(data) {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "Skipping malformed stream chunk");
                return None;
            }
        };

        if let Some(message) = json["error"]["message"].as_str() {
            self.error = Some(message.to_string());
            return None;
        }
        if let Some(usage) = parse_usage(&json) {
            self.usage = Some(usage);
        }

        let delta = json["choices"].get(0).map(|c| &c["delta"])?;

        if let Some(calls) = delta["tool_calls"].as_array() {
            for (pos, part) in calls.iter().enumerate() {
                let index = match part["index"].as_u64() {
                    Some(i) => usize::try_from(i).unwrap_or(usize::MAX),
                    None => pos,
                };
                // Indices arrive in order; a new call may only extend the list by one.
                if index > self.tool_calls.len() || index >= MAX_STREAMED_TOOL_CALLS {
                    warn!(index, "Rejecting out-of-range streamed tool call index");
                    self.malformed
                        .get_or_insert_with(|| format!("tool call index {index} out of range"));
                    continue;
                }
                if index == self.tool_calls.len() {
                    self.tool_calls.push(ToolCall::default());
                }
                let call = &mut self.tool_calls[index];
                if let Some(id) = part["id"].as_str() {
                    call.id = id.to_string();
                }
                if let Some(name) = part["function"]["name"].as_str() {
                    call.name.push_str(name);
                }
                if let Some(args) = part["function"]["arguments"].as_str() {
                    call.arguments.push_str(args);
                }
            }
        }

        let text = delta["content"].as_str().filter(|t| !t.is_empty())?;
        self.content.push_str(text);
        Some(text.to_string())
    }

    pub(crate) fn finish(self) -> Result<Completion, AiError> {
        if let Some(message) = self.error {
            return Err(AiError::ApiError(message));
        }
        if let Some(reason) = self.malformed {
            return Err(AiError::ParseError(format!("malformed stream: {reason}")));
        }
        Ok(Completion {
            content: self.content,
            tool_calls: self
                .tool_calls
                .into_iter()
                .filter(|c| !c.name.is_empty())
                .collect(),
            usage: self.usage.unwrap_or_default(),
        })
    }
}

/// Usage from a top-level `usage` object or Groq's `x_groq.usage`.
fn parse_usage(json: &serde_json::Value) -> Option<TokenUsage> {
    let usage = json
        .get("usage")
        .filter(|u| u.is_object())
        .or_else(|| json["x_groq"].get("usage"))?;
    Some(TokenUsage {
        input_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: usage["completion_tokens"].as_u64().unwrap_or(0),
    })
}
