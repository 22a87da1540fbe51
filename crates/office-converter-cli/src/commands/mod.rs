//! CLI command definitions and dispatch.

pub mod config;
pub mod convert;
pub mod doctor;
pub mod formats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use office_converter::ConverterConfig;

/// Convert office documents with a headless LibreOffice
#[derive(Debug, Parser)]
#[command(name = "office-convert", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a document
    Convert(convert::ConvertArgs),
    /// List supported conversions
    Formats(formats::FormatsArgs),
    /// Locate the external converter
    Doctor,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ConverterConfig) -> anyhow::Result<()> {
        match &self.command {
            Commands::Convert(args) => convert::execute(args, config, self.format).await,
            Commands::Formats(args) => formats::execute(args, self.format),
            Commands::Doctor => doctor::execute(config, self.format),
            Commands::Config(args) => {
                config::execute(args, config, self.config.as_deref(), self.format)
            }
        }
    }
}
