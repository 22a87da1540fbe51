//! External converter diagnostics.

use office_converter::{ConverterConfig, ToolDiscovery};

use crate::output::{self, OutputFormat};

/// Execute the doctor command
pub fn execute(config: &ConverterConfig, format: OutputFormat) -> anyhow::Result<()> {
    match ToolDiscovery::discover(&config.binary) {
        Ok(installation) => {
            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("Converter found: {}", installation.summary()));
                    output::print_kv("Executable", &installation.executable.display().to_string());
                    output::print_kv("Install dir", &installation.install_dir.display().to_string());
                }
                OutputFormat::Json => output::print_json(&installation),
            }
            if installation.executable.as_os_str() != config.binary.as_str() {
                output::print_warning(&format!(
                    "Conversions run '{}'; set `binary` to the path above to use this installation",
                    config.binary
                ));
            }
            Ok(())
        }
        Err(e) => {
            output::print_warning("Install LibreOffice or set `binary` in the configuration");
            Err(e.into())
        }
    }
}
