mod cli;
mod commands;

use clap::Parser;
use pcs_core::config::loader::load_config;
use pcs_core::config::models::{LogFormat, LoggingConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let config = load_config(&cli.root).await?;
    init_tracing(&config.logging);

    commands::execute(cli.command, &config).await
}

/// Logs go to stderr so stdout stays machine readable.
///
/// `PCS_LOG_FORMAT` overrides the configured format and `RUST_LOG` the
/// configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let format = match std::env::var("PCS_LOG_FORMAT").ok().as_deref() {
        Some("json") => LogFormat::Json,
        Some("text") => LogFormat::Text,
        _ => logging.format,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
