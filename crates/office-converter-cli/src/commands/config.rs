//! Configuration management CLI commands.

use std::path::Path;

use clap::{Args, Subcommand};

use office_converter::ConverterConfig;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
///
/// The configuration was already loaded and validated by the caller, so
/// `validate` only reports on it.
pub fn execute(
    args: &ConfigArgs,
    config: &ConverterConfig,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Table => println!("{:#?}", config),
            OutputFormat::Json => output::print_json(config),
        },
        ConfigCommand::Validate => {
            let source = config_path
                .map(|p| format!("'{}'", p.display()))
                .unwrap_or_else(|| "defaults and environment".to_string());
            output::print_success(&format!("Configuration from {} is valid", source));
            output::print_kv("Binary", &config.binary);
            output::print_kv(
                "Staging dir",
                &config
                    .staging_dir
                    .as_ref()
                    .map(|d| d.display().to_string())
                    .unwrap_or_else(|| "(source directory)".to_string()),
            );
            output::print_kv(
                "Timeout",
                &config
                    .timeout_seconds
                    .map(|s| format!("{}s", s))
                    .unwrap_or_else(|| "none".to_string()),
            );
        }
    }

    Ok(())
}
