//! Lookup tool that delegates to a remote HTTP endpoint.

use async_trait::async_trait;
use tracing::debug;

use crate::AiError;

use super::{Tool, ToolKind};

/// Placeholder replaced with the URL-encoded query.
const QUERY_PLACEHOLDER: &str = "{query}";

/// Forwards a query to `endpoint` and returns the reply body, truncated.
pub struct RemoteLookupTool {
    kind: ToolKind,
    endpoint: String,
    max_chars: usize,
    http: reqwest::Client,
}

impl RemoteLookupTool {
    pub fn new(
        kind: ToolKind,
        endpoint: impl Into<String>,
        max_chars: usize,
    ) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            kind,
            endpoint: endpoint.into(),
            max_chars,
            http,
        })
    }

    /// The concrete URL for `query`.
    pub fn url_for(&self, query: &str) -> String {
        self.endpoint
            .replace(QUERY_PLACEHOLDER, &urlencoding::encode(query.trim()))
    }

    fn tool_error(&self, message: impl Into<String>) -> AiError {
        AiError::ToolError {
            tool: self.kind.name().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Tool for RemoteLookupTool {
    async fn run(&self, query: &str) -> Result<String, AiError> {
        if query.trim().is_empty() {
            return Err(self.tool_error("empty query"));
        }

        let url = self.url_for(query);
        debug!(tool = self.kind.name(), %url, "Remote lookup");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.tool_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.tool_error(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.tool_error(e.to_string()))?;

        let body = body.trim();
        if body.is_empty() {
            return Ok("No good result found.".to_string());
        }
        Ok(truncate_chars(body, self.max_chars))
    }
}

/// Cut `text` to at most `max` characters, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
