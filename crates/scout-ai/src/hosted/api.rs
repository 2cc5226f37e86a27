//! Agent trait implementation for HostedAgent (tool rounds + streaming).

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::agent::{Agent, AgentRequest};
use crate::streaming::{parse_sse_stream, SseEvent};
use crate::thought::Thought;
use crate::AiError;

use super::client::{Completion, HostedAgent, StreamAccumulator, ToolCall};

#[async_trait]
impl Agent for HostedAgent {
    async fn invoke(
        &self,
        request: AgentRequest<'_>,
        on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<String, AiError> {
        let definitions = request.tools.definitions();
        let mut scratch: Vec<serde_json::Value> = Vec::new();
        let max_rounds = self.config.max_tool_rounds;

        for round in 0..=max_rounds {
            // The last round withholds the tools so the model has to answer.
            let allow_tools = round < max_rounds;
            let body = self.build_request_body(&request, &scratch, &definitions, allow_tools);

            let completion = if request.streaming {
                self.complete_streaming(&request, &body, on_thought).await?
            } else {
                self.complete(&request, &body).await?
            };
            self.record_usage(request.model, &completion.usage);

            if completion.tool_calls.is_empty() || !allow_tools {
                if !completion.tool_calls.is_empty() {
                    debug!(round, "Max tool rounds reached, returning partial response");
                }
                return Ok(completion.content);
            }

            if !request.streaming && !completion.content.trim().is_empty() {
                on_thought(Thought::Text(completion.content.clone()));
            }

            scratch.push(completion.assistant_entry());
            for call in &completion.tool_calls {
                let output = self.run_tool(&request, call, on_thought).await;
                scratch.push(call.result_entry(&output));
            }
        }

        Err(AiError::ApiError("tool round limit exceeded".into()))
    }
}

impl HostedAgent {
    /// Run one requested tool. Failures become the tool result so the
    /// model can recover.
    async fn run_tool(
        &self,
        request: &AgentRequest<'_>,
        call: &ToolCall,
        on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> String {
        let query = call.query();
        on_thought(Thought::ToolCall {
            tool: call.name.clone(),
            input: query.clone(),
        });

        let Some(spec) = request.tools.get(&call.name) else {
            let error = format!("'{}' is not a valid tool", call.name);
            warn!(tool = %call.name, "Model requested unknown tool");
            on_thought(Thought::ToolError {
                tool: call.name.clone(),
                error: error.clone(),
            });
            return error;
        };

        debug!(tool = %call.name, "Executing tool");
        match spec.run(&query).await {
            Ok(output) => {
                on_thought(Thought::ToolOutput {
                    tool: call.name.clone(),
                    output: output.clone(),
                });
                output
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool failed");
                on_thought(Thought::ToolError {
                    tool: call.name.clone(),
                    error: e.to_string(),
                });
                format!("Error: {e}")
            }
        }
    }

    async fn send(
        &self,
        request: &AgentRequest<'_>,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, AiError> {
        debug!(model = %request.model, url = %self.config.api_url, "Chat completion request");

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(request.credential.expose())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        check_status(response).await
    }

    async fn complete(
        &self,
        request: &AgentRequest<'_>,
        body: &serde_json::Value,
    ) -> Result<Completion, AiError> {
        let response = self.send(request, body).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;
        self.parse_response(json)
    }

    async fn complete_streaming(
        &self,
        request: &AgentRequest<'_>,
        body: &serde_json::Value,
        on_thought: &(dyn Fn(Thought) + Send + Sync),
    ) -> Result<Completion, AiError> {
        let response = self.send(request, body).await?;

        let mut acc = StreamAccumulator::default();
        parse_sse_stream(response, |event: SseEvent| {
            if event.is_done() {
                return;
            }
            if let Some(chunk) = acc.apply(&event.data) {
                on_thought(Thought::Text(chunk));
            }
        })
        .await?;

        let completion = acc.finish()?;
        if completion.usage.total_tokens() == 0 {
            debug!("No usage data received in streaming response");
        }
        Ok(completion)
    }
}

/// Map non-success statuses to errors, preferring the API's own message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AiError::RateLimited);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or(text);
    let message = message.chars().take(200).collect::<String>();

    error!(%status, %message, "Chat completion returned HTTP error");
    Err(AiError::ApiError(format!("HTTP {status}: {message}")))
}
