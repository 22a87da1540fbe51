//! Conversion sessions for a single source document.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::ConverterConfig;
use crate::error::ConversionError;
use crate::executor::{ConversionCommand, ConversionExecutor};
use crate::filesystem::FsUtils;
use crate::formats::table;

/// Construction inputs for an [`OfficeConverter`].
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Where converted files are written. Falls back to the source directory.
    pub staging_dir: Option<PathBuf>,
    /// Executable name or path of the external converter.
    pub binary: String,
    /// Replace `HOME` for the child when the current one is not writable.
    pub prefix_with_export_home: bool,
    /// Value given to `HOME` when it is replaced.
    pub fallback_home: PathBuf,
    /// Optional limit on a single converter run.
    pub timeout: Option<Duration>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self::from(&ConverterConfig::default())
    }
}

impl From<&ConverterConfig> for ConverterOptions {
    fn from(config: &ConverterConfig) -> Self {
        Self {
            staging_dir: config.staging_dir.clone(),
            binary: config.binary.clone(),
            prefix_with_export_home: config.prefix_with_export_home,
            fallback_home: config.fallback_home.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// A validated source document ready to be converted.
///
/// Construction checks that the source exists and that its format is
/// listed in the conversion table. Each [`convert_to`](Self::convert_to)
/// call is independent.
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    source: PathBuf,
    basename: String,
    extension: String,
    staging_dir: PathBuf,
    binary: String,
    prefix_with_export_home: bool,
    fallback_home: PathBuf,
    timeout: Option<Duration>,
    executor: ConversionExecutor,
}

impl OfficeConverter {
    /// Open `path` with default options.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        Self::with_options(path, ConverterOptions::default())
    }

    /// Open `path` using values from a loaded configuration.
    pub fn from_config(
        path: impl AsRef<Path>,
        config: &ConverterConfig,
    ) -> Result<Self, ConversionError> {
        Self::with_options(path, ConverterOptions::from(config))
    }

    /// Open `path` with explicit options.
    pub fn with_options(
        path: impl AsRef<Path>,
        options: ConverterOptions,
    ) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConversionError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let source = std::fs::canonicalize(path)?;
        let basename = FsUtils::extract_filename_str(&source);
        let raw_extension = FsUtils::extension_str(&source).unwrap_or_default();
        if !table::is_supported_input(&raw_extension) {
            return Err(ConversionError::UnsupportedInputExtension {
                extension: raw_extension,
            });
        }

        let staging_dir = FsUtils::resolve_staging_dir(options.staging_dir.as_deref(), &source)?;

        Ok(Self {
            source,
            basename,
            extension: raw_extension.to_lowercase(),
            staging_dir,
            binary: options.binary,
            prefix_with_export_home: options.prefix_with_export_home,
            fallback_home: options.fallback_home,
            timeout: options.timeout,
            executor: ConversionExecutor::new(),
        })
    }

    /// Absolute path of the source document.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File name of the source document.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Lowercase source extension; empty when the file has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Absolute directory receiving converted output.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Executable invoked for conversions.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Output extensions this document can be converted to.
    pub fn allowed_outputs(&self) -> &'static [&'static str] {
        table::allowed_outputs(Some(self.extension.as_str()))
    }

    /// Build the converter invocation for `output_extension`, consulting
    /// the current `HOME` for the override decision.
    pub fn build_command(&self, output_extension: &str) -> ConversionCommand {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        self.command_for(output_extension, home.as_deref())
    }

    fn command_for(&self, output_extension: &str, home: Option<&Path>) -> ConversionCommand {
        let command = ConversionCommand::headless(
            &self.binary,
            output_extension,
            &self.source,
            &self.staging_dir,
        )
        .timeout(self.timeout);

        if self.prefix_with_export_home && FsUtils::needs_home_override(home) {
            warn!(
                home = ?home,
                fallback = %self.fallback_home.display(),
                "HOME is not writable, overriding it for the converter"
            );
            return command.env("HOME", &self.fallback_home);
        }
        command
    }

    /// Convert the source into `target_file_name` inside the staging
    /// directory. The target's extension selects the output format.
    ///
    /// Returns the requested path, or the converter's own file name if the
    /// final rename failed. `Ok(None)` means the converter exited
    /// successfully but left no output behind.
    pub async fn convert_to(
        &self,
        target_file_name: &str,
    ) -> Result<Option<PathBuf>, ConversionError> {
        let target = Path::new(target_file_name);
        let output_extension = FsUtils::extension_str(target)
            .unwrap_or_default()
            .to_lowercase();

        if !table::is_supported_conversion(&self.extension, &output_extension) {
            return Err(ConversionError::UnsupportedConversion {
                extension: output_extension,
                basename: self.basename.clone(),
            });
        }

        info!(
            source = %self.source.display(),
            target = %target_file_name,
            format = %output_extension,
            "Starting conversion"
        );

        let command = self.build_command(&output_extension);
        let result = self.executor.execute(&command).await?;

        let produced_name = FsUtils::tool_output_name(&self.source, &output_extension);
        let target_name = FsUtils::extract_filename_str(target);
        let output =
            FsUtils::collect_output(&self.staging_dir, &produced_name, &target_name).await;

        if let Some(ref path) = output {
            info!(
                output = %path.display(),
                duration_ms = result.duration_ms,
                "Conversion completed"
            );
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"content").expect("write");
        path
    }

    #[test]
    fn test_missing_source() {
        let err = OfficeConverter::new("/nonexistent/report.docx").expect_err("should fail");
        assert!(matches!(err, ConversionError::FileNotFound { .. }));
    }

    #[test]
    fn test_unsupported_input_extensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["notes.md", "archive.zip", "sheet.ods", "binary.exe"] {
            let path = source_file(dir.path(), name);
            let err = OfficeConverter::new(&path).expect_err("should fail");
            assert!(
                matches!(err, ConversionError::UnsupportedInputExtension { .. }),
                "{name}"
            );
        }
    }

    #[test]
    fn test_session_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "Quarterly.DOCX");

        let converter = OfficeConverter::new(&path).expect("open");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        assert_eq!(converter.source(), canonical_dir.join("Quarterly.DOCX"));
        assert_eq!(converter.basename(), "Quarterly.DOCX");
        assert_eq!(converter.extension(), "docx");
        assert_eq!(converter.staging_dir(), canonical_dir);
        assert_eq!(converter.binary(), "libreoffice");
        assert_eq!(converter.allowed_outputs(), &["pdf", "odt", "html"]);
    }

    #[test]
    fn test_extensionless_source_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "LICENSE");

        let converter = OfficeConverter::new(&path).expect("open");
        assert_eq!(converter.extension(), "");
        assert_eq!(converter.allowed_outputs(), &["pdf"]);
    }

    #[test]
    fn test_invalid_staging_dir_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "deck.pptx");

        let options = ConverterOptions {
            staging_dir: Some(dir.path().join("missing")),
            ..Default::default()
        };
        let converter = OfficeConverter::with_options(&path, options).expect("open");
        assert_eq!(
            converter.staging_dir(),
            dir.path().canonicalize().expect("canonicalize")
        );
    }

    #[test]
    fn test_command_without_home_override() {
        let dir = tempfile::tempdir().expect("tempdir");
        let home = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "scan.png");

        let converter = OfficeConverter::new(&path).expect("open");
        let cmd = converter.command_for("pdf", Some(home.path()));
        assert!(cmd.env_vars.is_empty());
        assert_eq!(cmd.program, "libreoffice");
        assert_eq!(cmd.args[3], converter.source().as_os_str());
        assert_eq!(cmd.args[5], converter.staging_dir().as_os_str());
    }

    #[test]
    fn test_command_overrides_unwritable_home() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "scan.png");

        let converter = OfficeConverter::new(&path).expect("open");
        let cmd = converter.command_for("pdf", Some(dir.path().join("no-such-home").as_path()));
        assert_eq!(
            cmd.env_vars.get("HOME").map(|v| v.to_string_lossy().into_owned()),
            Some("/tmp".to_string())
        );

        let cmd = converter.command_for("pdf", None);
        assert!(cmd.env_vars.contains_key("HOME"));
    }

    #[test]
    fn test_home_prefix_disabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "scan.png");

        let options = ConverterOptions {
            prefix_with_export_home: false,
            ..Default::default()
        };
        let converter = OfficeConverter::with_options(&path, options).expect("open");
        let cmd = converter.command_for("pdf", None);
        assert!(cmd.env_vars.is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = ConverterConfig {
            binary: "soffice".to_string(),
            timeout_seconds: Some(90),
            ..Default::default()
        };
        let options = ConverterOptions::from(&config);
        assert_eq!(options.binary, "soffice");
        assert_eq!(options.timeout, Some(Duration::from_secs(90)));
        assert!(options.prefix_with_export_home);
    }

    #[tokio::test]
    async fn test_unsupported_pairs_fail_before_running() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = source_file(dir.path(), "scan.pdf");
        let options = ConverterOptions {
            binary: "/nonexistent/soffice".to_string(),
            ..Default::default()
        };
        let converter = OfficeConverter::with_options(&path, options).expect("open");

        for target in ["scan.docx", "scan.xlsx", "scan", "scan.txt"] {
            let err = converter.convert_to(target).await.expect_err("should fail");
            assert!(
                matches!(err, ConversionError::UnsupportedConversion { .. }),
                "{target}"
            );
        }

        let err = converter.convert_to("scan.docx").await.expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "Output extension (docx) not supported for input file (scan.pdf)"
        );
    }
}
