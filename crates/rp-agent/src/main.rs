//! Rich presence agent
//!
//! Connects to the desktop application's local IPC endpoint and keeps a
//! clock activity published until interrupted.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rp_agent::prompt;
use rp_agent::{
    ClockActivity, ExponentialBackoff, LocalTransport, PresenceScheduler, SessionClient,
};
use rp_core::config::{self, AgentConfig};
use rp_core::{ClientId, ConnectError};

#[derive(Parser)]
#[command(name = "rich-presence")]
#[command(about = "Publishes a live clock as your rich presence over the desktop app's IPC")]
#[command(version)]
struct Args {
    /// Application client ID (prompted for if not set anywhere)
    #[arg(long, env = "DISCORD_CLIENT_ID")]
    client_id: Option<String>,

    /// Seconds between presence updates
    #[arg(short, long)]
    interval: Option<u64>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of full endpoint sweeps before giving up on the first connect
    #[arg(long)]
    connect_attempts: Option<u32>,

    /// Use the client ID even if it doesn't look valid
    #[arg(short, long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| args.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Rich presence agent starting...");

    // Load configuration
    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);

    let mut config = if config_path.exists() {
        config::load_config(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {:?}: {}", config_path, e);
            AgentConfig::default()
        })
    } else {
        AgentConfig::default()
    };

    // Apply command-line overrides
    if let Some(interval) = args.interval {
        config.update_interval = Duration::from_secs(interval);
    }
    if let Some(attempts) = args.connect_attempts {
        config.connect_attempts = attempts;
    }
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {:?}", config_path))?;

    let client_id = obtain_client_id(&args, &config)?;
    tracing::info!("Using client ID {}", client_id);

    let mut session = SessionClient::new(client_id, LocalTransport::from_config(&config));
    let backoff = ExponentialBackoff::from_config(&config.backoff);

    if let Err(e) = session.connect_with_retry(config.connect_attempts, backoff).await {
        print_troubleshooting(&e);
        return Err(e).context("Failed to connect to the desktop application");
    }

    let mut scheduler = PresenceScheduler::new(
        session,
        ClockActivity::new(config.assets.clone()),
        config.update_interval,
    );

    tokio::select! {
        _ = scheduler.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down...");
        }
    }

    scheduler.session_mut().close().await;
    tracing::info!(
        "Published {} updates ({} failed)",
        scheduler.updates(),
        scheduler.failures()
    );

    Ok(())
}

/// Resolve the client ID and confirm it if it looks wrong
fn obtain_client_id(args: &Args, config: &AgentConfig) -> Result<ClientId> {
    let resolved =
        prompt::resolve_client_id(args.client_id.as_deref(), config.client_id.as_deref());
    let client_id = match resolved {
        Some(id) => id,
        None => prompt::prompt_client_id().context("Failed to read client ID")?,
    };

    if !client_id.looks_valid() && !args.force {
        tracing::warn!(
            "'{}' doesn't look like a client ID (expected 17-20 digits)",
            client_id
        );
        if !prompt::confirm("Continue anyway?")? {
            anyhow::bail!("Aborted: '{}' doesn't look like a valid client ID", client_id);
        }
    }

    Ok(client_id)
}

fn print_troubleshooting(error: &ConnectError) {
    eprintln!("Could not connect: {}", error);
    eprintln!();
    eprintln!("Troubleshooting:");
    eprintln!("  1. Make sure the desktop app is running (not the browser version)");
    eprintln!("  2. Enable activity status in the app's privacy settings");
    eprintln!("  3. Check that the client ID belongs to your application");
    eprintln!("  4. Restart the desktop app and try again");
    if cfg!(unix) {
        eprintln!("  5. The app must see the same XDG_RUNTIME_DIR / TMPDIR as this process");
        eprintln!("     (sandboxed installs often don't)");
    }
}
