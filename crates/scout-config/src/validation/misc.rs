//! Validation for the session and display sections.

use crate::schema::ScoutConfig;

use super::helpers::{validate_not_blank, validate_range};

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ScoutConfig) {
    validate_not_blank(errors, "session.greeting", &config.session.greeting);
}

pub(crate) fn validate_display(errors: &mut Vec<String>, config: &ScoutConfig) {
    validate_range(
        errors,
        "display.max_thoughts",
        config.display.max_thoughts,
        0,
        50,
    );
}
