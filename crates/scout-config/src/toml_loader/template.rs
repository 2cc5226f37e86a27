//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Scout Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[agent]
# model = "llama-3.1-8b-instant"
# api_url = "https://api.groq.com/openai/v1/chat/completions"
# credential_env = "GROQ_API_KEY"   # env var holding the API key
# streaming = true
# temperature = 0.7                 # 0.0-2.0
# max_tokens = 1024
# max_tool_rounds = 6               # 1-25
# turn_timeout_secs = 60            # 1-600

[prompt]
# source = "literal"                # literal, hub
# text = "You are a helpful research assistant. Use your tools to answer the user's question."
# hub_name = "hwchase17/react-chat"
# hub_url = "https://prompts.example.com/v1"   # required when source = "hub"

[session]
# greeting = "Hi, I'm a research agent. How can I help you?"
# title = "Scout Research Agent"
# input_placeholder = "What is the latest on Llama 3.1?"

[display]
# expand_thoughts = true
# max_thoughts = 6                  # 0-50
# collapse_completed = false

# [tools.search]
# endpoint = "https://api.duckduckgo.com/?q={query}&format=json&no_html=1"
# max_chars = 1500                  # 50-20000

# [tools.wiki]
# endpoint = "https://en.wikipedia.org/api/rest_v1/page/summary/{query}"
# max_chars = 1500

# [tools.arxiv]
# endpoint = "http://export.arxiv.org/api/query?search_query=all:{query}&max_results=1"
# max_chars = 1500

[logging]
# level = "info"                    # trace, debug, info, warn, error
"##
    .to_string()
}
