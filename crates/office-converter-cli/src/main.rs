//! Office converter CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use office_converter::{ConverterConfig, ErrorKind, LogFormat};

mod commands;
mod output;

use commands::Cli;
use commands::convert::OutputMissing;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConverterConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e));
            std::process::exit(exit_code(&anyhow::Error::from(e)));
        }
    };

    init_logging(&config);
    tracing::debug!(config = ?config, "Configuration loaded");

    if let Err(e) = cli.execute(&config).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(exit_code(&e));
    }
}

/// Initialize tracing/logging
fn init_logging(config: &ConverterConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Map a failure to a process exit status (sysexits-style).
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<OutputMissing>().is_some() {
        return 2;
    }
    match err
        .downcast_ref::<office_converter::ConversionError>()
        .map(|e| e.kind())
    {
        Some(ErrorKind::Validation) => 65,
        Some(ErrorKind::NotFound) => 66,
        Some(ErrorKind::ExternalService) => 69,
        Some(ErrorKind::Configuration) => 78,
        Some(ErrorKind::Internal) | None => 1,
    }
}
