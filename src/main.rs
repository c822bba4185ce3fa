use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;

use gramgate::cli::{Cli, Commands};
use gramgate::core::{config, init_logger};
use gramgate::fetch::{InstagramClient, ProfileTarget};
use gramgate::web::{run_media_lookup, run_profile_lookup, start_web_server, ApiState};

/// Main entry point for the API server
///
/// Parses CLI arguments and dispatches to the server or the one-shot fetch.
///
/// # Errors
/// Returns an error if initialization fails (logging, server bind) or a
/// one-shot fetch fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    let state = ApiState::new(Arc::new(InstagramClient::new()));

    match cli.command {
        Some(Commands::Fetch { target }) => {
            let started = Instant::now();
            let envelope = if let Some(username) = target.strip_prefix('@') {
                run_profile_lookup(&state, &ProfileTarget::Username(username.to_string()), started).await?
            } else {
                run_media_lookup(&state, &target, started).await?
            };

            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
        Some(Commands::Serve { port }) => serve(port.unwrap_or(*config::WEB_PORT), state).await,
        None => serve(*config::WEB_PORT, state).await,
    }
}

async fn serve(port: u16, state: ApiState) -> Result<()> {
    start_web_server(port, state)
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))
}
