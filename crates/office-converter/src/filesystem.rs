//! Filesystem helpers for staging and collecting converter output.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Filesystem utility functions.
pub struct FsUtils;

impl FsUtils {
    /// Extract filename as String; returns `"unknown_file"` for empty paths.
    pub fn extract_filename_str(path: &Path) -> String {
        path.file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown_file".to_string())
    }

    /// Extension exactly as it appears on the path, if any.
    pub fn extension_str(path: &Path) -> Option<String> {
        path.extension().map(|e| e.to_string_lossy().into_owned())
    }

    /// Name the external converter gives its output: the source stem
    /// followed by the output extension.
    pub fn tool_output_name(source: &Path, output_extension: &str) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}.{}", stem, output_extension)
    }

    /// Resolve the staging directory to an absolute path.
    ///
    /// Anything that is not an existing directory falls back to the
    /// directory containing `source`, which must already be absolute.
    pub fn resolve_staging_dir(
        requested: Option<&Path>,
        source: &Path,
    ) -> Result<PathBuf, std::io::Error> {
        if let Some(dir) = requested {
            if dir.is_dir() {
                return std::fs::canonicalize(dir);
            }
            warn!(
                requested = %dir.display(),
                "Staging path is not a directory, using the source directory"
            );
        }

        let parent = source.parent().unwrap_or_else(|| Path::new("/"));
        std::fs::canonicalize(parent)
    }

    /// Whether new files can be created in `dir`.
    pub fn is_dir_writable(dir: &Path) -> bool {
        dir.is_dir()
            && tempfile::Builder::new()
                .prefix(".office-converter-probe")
                .tempfile_in(dir)
                .is_ok()
    }

    /// Whether the child process needs `HOME` replaced before launch.
    pub fn needs_home_override(home: Option<&Path>) -> bool {
        match home {
            Some(dir) if !dir.as_os_str().is_empty() => !Self::is_dir_writable(dir),
            _ => true,
        }
    }

    /// Move the converter's output to `target_name` inside `staging_dir`.
    ///
    /// Returns the requested path on success, the tool-named path if the
    /// rename failed but that file exists, and `None` when neither is there.
    pub async fn collect_output(
        staging_dir: &Path,
        produced_name: &str,
        target_name: &str,
    ) -> Option<PathBuf> {
        let produced = staging_dir.join(produced_name);
        let target = staging_dir.join(target_name);

        match tokio::fs::rename(&produced, &target).await {
            Ok(()) => return Some(target),
            Err(e) => debug!(
                from = %produced.display(),
                to = %target.display(),
                error = %e,
                "Rename of converter output failed"
            ),
        }

        let produced_is_file = tokio::fs::metadata(&produced)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if produced_is_file {
            warn!(
                path = %produced.display(),
                requested = %target_name,
                "Keeping converter output under its original name"
            );
            Some(produced)
        } else {
            warn!(
                path = %produced.display(),
                "Converter reported success but produced no output file"
            );
            None
        }
    }
}
