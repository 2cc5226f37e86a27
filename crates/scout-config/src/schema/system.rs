//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the scout crates at this level.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "scout=trace",
            LogLevel::Debug => "scout=debug",
            LogLevel::Info => "scout=info",
            LogLevel::Warn => "scout=warn",
            LogLevel::Error => "scout=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
