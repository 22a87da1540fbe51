//! Supported conversion listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use office_converter::{ConversionRule, rules};

use crate::output::{self, OutputFormat};

/// Arguments for the formats command
#[derive(Debug, Args)]
pub struct FormatsArgs {
    /// Only show conversions for this input extension
    #[arg(short, long)]
    pub input: Option<String>,
}

/// One row of the listing
#[derive(Debug, Serialize, Tabled)]
struct FormatRow {
    /// Input extension
    #[tabled(rename = "Input")]
    input: String,
    /// Document family
    #[tabled(rename = "Family")]
    family: String,
    /// Allowed outputs
    #[tabled(rename = "Outputs")]
    outputs: String,
}

impl From<ConversionRule> for FormatRow {
    fn from(rule: ConversionRule) -> Self {
        let input = if rule.input.is_empty() {
            "(none)".to_string()
        } else {
            rule.input.to_string()
        };
        Self {
            input,
            family: rule.family.to_string(),
            outputs: rule.outputs.join(", "),
        }
    }
}

fn matching_rules(filter: Option<&str>) -> Vec<FormatRow> {
    let filter = filter.map(|ext| ext.trim_start_matches('.').to_lowercase());
    rules()
        .filter(|rule| filter.as_deref().is_none_or(|ext| rule.input == ext))
        .map(FormatRow::from)
        .collect()
}

/// Execute the formats command
pub fn execute(args: &FormatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let rows = matching_rules(args.input.as_deref());
    output::print_list(&rows, format);
    Ok(())
}
