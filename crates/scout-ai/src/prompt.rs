//! System prompt sources: a literal string or a template fetched from a
//! remote prompt hub.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::AiError;

/// A remote repository of named prompt templates.
#[async_trait]
pub trait PromptHub: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<String, AiError>;
}

/// Where a session's system prompt comes from.
///
/// Hub templates are fetched on first use and cached for the life of
/// the source; a failed fetch is not cached, so the next turn retries.
#[derive(Clone)]
pub enum PromptSource {
    Literal(String),
    Hub {
        hub: Arc<dyn PromptHub>,
        name: String,
        resolved: Arc<OnceCell<String>>,
    },
}

impl PromptSource {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn hub(hub: Arc<dyn PromptHub>, name: impl Into<String>) -> Self {
        Self::Hub {
            hub,
            name: name.into(),
            resolved: Arc::new(OnceCell::new()),
        }
    }

    /// The prompt text, fetching it from the hub if not done yet.
    pub async fn resolve(&self) -> Result<String, AiError> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Hub {
                hub,
                name,
                resolved,
            } => {
                let text = resolved
                    .get_or_try_init(|| async {
                        debug!(prompt = %name, "Fetching prompt template");
                        let text = hub.fetch(name).await?;
                        if text.trim().is_empty() {
                            return Err(AiError::PromptError(format!(
                                "prompt '{name}' is empty"
                            )));
                        }
                        info!(prompt = %name, len = text.len(), "Prompt template resolved");
                        Ok(text)
                    })
                    .await?;
                Ok(text.clone())
            }
        }
    }

    /// Whether `resolve` can answer without a fetch.
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Hub { resolved, .. } => resolved.initialized(),
        }
    }
}

impl fmt::Debug for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Hub { name, resolved, .. } => f
                .debug_struct("Hub")
                .field("name", name)
                .field("resolved", &resolved.initialized())
                .finish(),
        }
    }
}

/// Prompt hub reached over HTTP at `{base_url}/{name}`.
///
/// The reply is either the raw template text or a JSON object with a
/// `template` string field.
pub struct HttpPromptHub {
    base_url: String,
    http: reqwest::Client,
}

impl HttpPromptHub {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn template_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl PromptHub for HttpPromptHub {
    async fn fetch(&self, name: &str) -> Result<String, AiError> {
        let url = self.template_url(name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AiError::PromptError(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::PromptError(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AiError::PromptError(format!("{url}: {e}")))?;
        parse_template_body(&body)
    }
}

/// Extract the template from a hub reply body.
pub fn parse_template_body(body: &str) -> Result<String, AiError> {
    let trimmed = body.trim();
    if !trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let json: serde_json::Value = serde_json::from_str(trimmed)
        .map_err(|e| AiError::PromptError(format!("invalid template JSON: {e}")))?;
    json.get("template")
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
        .ok_or_else(|| AiError::PromptError("template JSON has no 'template' string".into()))
}
