//! The fixed lookup tool set exposed to the agent.
//!
//! Exactly three tools exist (`search`, `wiki`, `arxiv`). They are built
//! once at startup and never added to or removed afterwards.

mod definitions;
mod remote;

use std::sync::Arc;

use async_trait::async_trait;

use crate::AiError;

pub use definitions::{to_openai_tool, ToolDefinition};
pub use remote::{truncate_chars, RemoteLookupTool};

/// A lookup capability: text query in, text answer out.
#[async_trait]
pub trait Tool: Send + Sync {
    async fn run(&self, query: &str) -> Result<String, AiError>;
}

/// One of the three lookup tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Search,
    Wiki,
    Arxiv,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Search, ToolKind::Wiki, ToolKind::Arxiv];

    /// Stable name the model uses to call the tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Search => "search",
            ToolKind::Wiki => "wiki",
            ToolKind::Arxiv => "arxiv",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Search => {
                "A web search engine. Useful for answering questions about current \
                 events. Input should be a search query."
            }
            ToolKind::Wiki => {
                "A wrapper around Wikipedia. Useful for general questions about people, \
                 places, companies, facts, historical events, or other subjects. \
                 Input should be a search query."
            }
            ToolKind::Arxiv => {
                "A wrapper around Arxiv.org. Useful for questions about Physics, \
                 Mathematics, Computer Science, Quantitative Biology, Quantitative \
                 Finance, Statistics, Electrical Engineering, and Economics from \
                 scientific articles on arxiv.org. Input should be a search query."
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// A named tool plus the handle that runs it.
#[derive(Clone)]
pub struct ToolSpec {
    kind: ToolKind,
    handle: Arc<dyn Tool>,
}

impl ToolSpec {
    pub fn new(kind: ToolKind, handle: Arc<dyn Tool>) -> Self {
        Self { kind, handle }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::query_tool(self.kind.name(), self.kind.description())
    }

    pub async fn run(&self, query: &str) -> Result<String, AiError> {
        self.handle.run(query).await
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec").field("kind", &self.kind).finish()
    }
}

/// The immutable `search` / `wiki` / `arxiv` set.
#[derive(Debug, Clone)]
pub struct ToolSet {
    specs: [ToolSpec; 3],
}

impl ToolSet {
    pub fn new(search: Arc<dyn Tool>, wiki: Arc<dyn Tool>, arxiv: Arc<dyn Tool>) -> Self {
        Self {
            specs: [
                ToolSpec::new(ToolKind::Search, search),
                ToolSpec::new(ToolKind::Wiki, wiki),
                ToolSpec::new(ToolKind::Arxiv, arxiv),
            ],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolSpec> {
        self.specs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        let kind = ToolKind::from_name(name)?;
        self.specs.iter().find(|s| s.kind == kind)
    }

    pub fn names(&self) -> [&'static str; 3] {
        [
            self.specs[0].name(),
            self.specs[1].name(),
            self.specs[2].name(),
        ]
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.specs.iter().map(ToolSpec::definition).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(&'static str);

    #[async_trait]
    impl Tool for Echo {
        async fn run(&self, query: &str) -> Result<String, AiError> {
            Ok(format!("{}:{query}", self.0))
        }
    }

    fn echo_set() -> ToolSet {
        ToolSet::new(
            Arc::new(Echo("s")),
            Arc::new(Echo("w")),
            Arc::new(Echo("a")),
        )
    }

    #[test]
    fn tool_set_has_fixed_names_in_order() {
        let set = echo_set();
        assert_eq!(set.names(), ["search", "wiki", "arxiv"]);
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn get_resolves_by_name_only_for_known_tools() {
        let set = echo_set();
        assert_eq!(set.get("wiki").map(ToolSpec::kind), Some(ToolKind::Wiki));
        assert!(set.get("Search").is_none());
        assert!(set.get("calculator").is_none());
    }

    #[tokio::test]
    async fn spec_runs_its_own_handle() {
        let set = echo_set();
        let out = set.get("arxiv").unwrap().run("attention").await.unwrap();
        assert_eq!(out, "a:attention");
    }

    #[test]
    fn definitions_take_a_single_query_argument() {
        let defs = echo_set().definitions();
        assert_eq!(defs.len(), 3);
        for def in &defs {
            assert_eq!(def.parameters["required"], serde_json::json!(["query"]));
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn kind_round_trips_through_name() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
    }
}
