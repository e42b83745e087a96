mod cli;

use clap::Parser;

fn load_config() -> coderx_core::Config {
    coderx_core::config::load_dotenv();
    coderx_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = cli::Cli::parse();
    let config = load_config();

    cli::dispatch(cli, &config).await
}
