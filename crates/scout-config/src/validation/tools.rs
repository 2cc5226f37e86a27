//! Lookup tool endpoint validation.

use crate::schema::{ScoutConfig, ToolEndpointConfig};

use super::helpers::{validate_http_url, validate_range};

pub(crate) fn validate_tools(errors: &mut Vec<String>, config: &ScoutConfig) {
    validate_endpoint(errors, "tools.search", &config.tools.search);
    validate_endpoint(errors, "tools.wiki", &config.tools.wiki);
    validate_endpoint(errors, "tools.arxiv", &config.tools.arxiv);
}

fn validate_endpoint(errors: &mut Vec<String>, section: &str, tool: &ToolEndpointConfig) {
    let name = format!("{section}.endpoint");
    validate_http_url(errors, &name, &tool.endpoint);
    if !tool.endpoint.contains("{query}") {
        errors.push(format!("{name} must contain a {{query}} placeholder"));
    }
    validate_range(
        errors,
        &format!("{section}.max_chars"),
        tool.max_chars,
        50,
        20000,
    );
}
