//! Document conversion command.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use serde::Serialize;
use thiserror::Error;

use office_converter::{ConverterConfig, ConverterOptions, OfficeConverter};

use crate::output::{self, OutputFormat};

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Source document
    pub input: PathBuf,

    /// Output file name; its extension selects the target format
    pub target: String,

    /// Directory for the converted file (defaults to the source directory)
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Converter executable name or path
    #[arg(long)]
    pub bin: Option<String>,

    /// Never override HOME for the converter process
    #[arg(long)]
    pub no_home_prefix: bool,

    /// Kill the converter after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// The converter exited successfully but its output could not be found.
#[derive(Debug, Error)]
#[error("Conversion reported success but no output was found for {input}")]
pub struct OutputMissing {
    /// The source document
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    input: PathBuf,
    output: PathBuf,
}

/// Merge command-line overrides into the configured options.
fn build_options(args: &ConvertArgs, config: &ConverterConfig) -> ConverterOptions {
    let mut options = ConverterOptions::from(config);
    if let Some(ref dir) = args.outdir {
        options.staging_dir = Some(dir.clone());
    }
    if let Some(ref bin) = args.bin {
        options.binary = bin.clone();
    }
    if args.no_home_prefix {
        options.prefix_with_export_home = false;
    }
    if let Some(secs) = args.timeout {
        options.timeout = Some(Duration::from_secs(secs));
    }
    options
}

/// Execute the convert command
pub async fn execute(
    args: &ConvertArgs,
    config: &ConverterConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let converter = OfficeConverter::with_options(&args.input, build_options(args, config))?;

    let Some(path) = converter.convert_to(&args.target).await? else {
        return Err(OutputMissing {
            input: args.input.clone(),
        }
        .into());
    };

    match format {
        OutputFormat::Table => println!("{}", path.display()),
        OutputFormat::Json => output::print_json(&ConvertOutput {
            input: converter.source().to_path_buf(),
            output: path,
        }),
    }

    Ok(())
}
