//! CLI argument parsing and subcommand dispatch.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use coderx_core::Config;
use coderx_notify::{ContactSubmission, DispatchError, Dispatcher, Inquiry};
use coderx_server::{build_router, AppState, ChannelSource};

/// Contact-form relay for the CodeRx site.
#[derive(Parser, Debug)]
#[command(name = "coderx-server", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve(ServeArgs),
    /// Print the redacted configuration as JSON.
    Config,
    /// Send a sample inquiry through the configured channels.
    TestNotify,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address (overrides HOST).
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides PORT).
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn dispatch(cli: Cli, config: &Config) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(config, args).await,
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted_summary())?);
            Ok(())
        }
        Command::TestNotify => test_notify(config).await,
    }
}

async fn serve(config: &Config, args: ServeArgs) -> anyhow::Result<()> {
    config.log_summary();

    let state = Arc::new(AppState::new(ChannelSource::Environment));
    let app = build_router(state);

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Contact relay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("server exited unexpectedly")?;
    Ok(())
}

async fn test_notify(config: &Config) -> anyhow::Result<()> {
    let inquiry = Inquiry::parse(ContactSubmission {
        name: Some("CodeRx test".to_string()),
        email: Some("test@coderx.dev".to_string()),
        subject: Some("[TEST] Contact relay check".to_string()),
        message: Some("This is a test notification from coderx-server.".to_string()),
    })?;

    let dispatcher = Dispatcher::from_config(&config.channels, reqwest::Client::new());
    info!(channels = ?dispatcher.channel_names(), "Dispatching test inquiry");

    match dispatcher.dispatch(&inquiry).await {
        Ok(delivery) => {
            for attempt in &delivery.attempts {
                println!(
                    "{:<10} {:<4} {:>6}ms {}",
                    attempt.channel,
                    if attempt.success { "ok" } else { "fail" },
                    attempt.duration_ms,
                    attempt.error.as_deref().unwrap_or("")
                );
            }
            println!("delivered via {}", delivery.channel);
            Ok(())
        }
        Err(DispatchError::NotDelivered { reason, attempts }) => {
            for attempt in &attempts {
                println!(
                    "{:<10} fail {:>6}ms {}",
                    attempt.channel,
                    attempt.duration_ms,
                    attempt.error.as_deref().unwrap_or("")
                );
            }
            anyhow::bail!("{reason}")
        }
    }
}
