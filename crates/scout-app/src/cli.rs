use std::path::PathBuf;

use clap::Parser;

/// Scout: a terminal research assistant with web, Wikipedia, and Arxiv lookups.
#[derive(Parser, Debug)]
#[command(name = "scout", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// API key for the hosted model. Defaults to the configured
    /// environment variable.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model override.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Wait for whole replies instead of streaming tokens.
    #[arg(long)]
    pub no_stream: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
