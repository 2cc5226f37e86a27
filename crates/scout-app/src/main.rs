mod boot;
mod cli;
mod render;
mod repl;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = cli::parse();

    // Config is read before logging starts so its level can apply.
    let loaded = scout_config::load_config(args.config.as_deref());

    let log_directive = boot::log_directive(args.log_level.as_deref(), loaded.as_ref().ok());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "scout=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Scout v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        scout_config::ScoutConfig::default()
    });
    tracing::info!(
        "Config loaded (model: {}, prompt: {:?})",
        config.agent.model,
        config.prompt.source
    );

    let shell = match boot::build_shell(&args, &config) {
        Ok(shell) => shell,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    repl::prefetch_prompt(&shell).await;

    if let Err(e) = repl::run(shell).await {
        tracing::error!("Shell error: {e}");
    }
    tracing::info!("Shutdown complete");
}
