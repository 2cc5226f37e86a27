//! Prompt source validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::{PromptSourceKind, ScoutConfig};

use super::helpers::{validate_http_url, validate_not_blank};

/// Hub template names are `owner/name`.
static HUB_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+$").unwrap());

pub(crate) fn validate_prompt(errors: &mut Vec<String>, config: &ScoutConfig) {
    let prompt = &config.prompt;
    match prompt.source {
        PromptSourceKind::Literal => {
            validate_not_blank(errors, "prompt.text", &prompt.text);
        }
        PromptSourceKind::Hub => {
            if prompt.hub_url.trim().is_empty() {
                errors.push("prompt.hub_url must be set when prompt.source = \"hub\"".into());
            } else {
                validate_http_url(errors, "prompt.hub_url", &prompt.hub_url);
            }
            if !HUB_NAME_RE.is_match(&prompt.hub_name) {
                errors.push(format!(
                    "prompt.hub_name = {:?} must look like owner/name",
                    prompt.hub_name
                ));
            }
        }
    }
}
