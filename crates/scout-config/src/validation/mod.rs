//! Full configuration validation.
//!
//! Validates numeric ranges, URL shapes, and the prompt source. Each
//! section has its own submodule; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod agent;
mod helpers;
mod misc;
mod prompt;
mod tools;


use crate::schema::ScoutConfig;
use scout_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ScoutConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    agent::validate_agent(&mut errors, config);
    prompt::validate_prompt(&mut errors, config);
    tools::validate_tools(&mut errors, config);
    misc::validate_session(&mut errors, config);
    misc::validate_display(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
