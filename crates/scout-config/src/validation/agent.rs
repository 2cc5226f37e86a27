//! Agent section validation.

use crate::schema::ScoutConfig;

use super::helpers::{validate_http_url, validate_not_blank, validate_range, validate_range_f64};

pub(crate) fn validate_agent(errors: &mut Vec<String>, config: &ScoutConfig) {
    let agent = &config.agent;
    validate_not_blank(errors, "agent.model", &agent.model);
    validate_not_blank(errors, "agent.credential_env", &agent.credential_env);
    validate_http_url(errors, "agent.api_url", &agent.api_url);
    validate_range_f64(errors, "agent.temperature", agent.temperature, 0.0, 2.0);
    validate_range(errors, "agent.max_tokens", agent.max_tokens, 1, 32768);
    validate_range(errors, "agent.max_tool_rounds", agent.max_tool_rounds, 1, 25);
    validate_range(
        errors,
        "agent.turn_timeout_secs",
        agent.turn_timeout_secs,
        1,
        600,
    );
}
