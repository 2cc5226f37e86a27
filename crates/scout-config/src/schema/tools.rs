//! Lookup tool endpoints.

use serde::{Deserialize, Deserializer, Serialize};

const SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/?q={query}&format=json&no_html=1";
const WIKI_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/{query}";
const ARXIV_ENDPOINT: &str =
    "http://export.arxiv.org/api/query?search_query=all:{query}&max_results=1";

/// One remote lookup endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ToolEndpointConfig {
    /// URL template; `{query}` is replaced with the URL-encoded query.
    pub endpoint: String,
    /// Replies are truncated to this many characters (50-20000).
    pub max_chars: u32,
}

impl ToolEndpointConfig {
    fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_chars: 1500,
        }
    }
}

/// A `[tools.*]` table as written; absent keys keep that tool's defaults.
#[derive(Deserialize)]
struct EndpointOverrides {
    endpoint: Option<String>,
    max_chars: Option<u32>,
}

fn overlay<'de, D: Deserializer<'de>>(
    deserializer: D,
    base: ToolEndpointConfig,
) -> Result<ToolEndpointConfig, D::Error> {
    let overrides = EndpointOverrides::deserialize(deserializer)?;
    Ok(ToolEndpointConfig {
        endpoint: overrides.endpoint.unwrap_or(base.endpoint),
        max_chars: overrides.max_chars.unwrap_or(base.max_chars),
    })
}

fn search_table<'de, D: Deserializer<'de>>(d: D) -> Result<ToolEndpointConfig, D::Error> {
    overlay(d, ToolEndpointConfig::new(SEARCH_ENDPOINT))
}

fn wiki_table<'de, D: Deserializer<'de>>(d: D) -> Result<ToolEndpointConfig, D::Error> {
    overlay(d, ToolEndpointConfig::new(WIKI_ENDPOINT))
}

fn arxiv_table<'de, D: Deserializer<'de>>(d: D) -> Result<ToolEndpointConfig, D::Error> {
    overlay(d, ToolEndpointConfig::new(ARXIV_ENDPOINT))
}

/// The fixed set of lookup tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    #[serde(deserialize_with = "search_table")]
    pub search: ToolEndpointConfig,
    #[serde(deserialize_with = "wiki_table")]
    pub wiki: ToolEndpointConfig,
    #[serde(deserialize_with = "arxiv_table")]
    pub arxiv: ToolEndpointConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search: ToolEndpointConfig::new(SEARCH_ENDPOINT),
            wiki: ToolEndpointConfig::new(WIKI_ENDPOINT),
            arxiv: ToolEndpointConfig::new(ARXIV_ENDPOINT),
        }
    }
}
