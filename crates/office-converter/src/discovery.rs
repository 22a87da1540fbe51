//! LibreOffice installation discovery.
//!
//! Locates a usable converter executable by checking, in order:
//! 1. An explicitly configured path (file or install directory)
//! 2. The system PATH
//! 3. Common installation directories for the current platform

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Executable names shipped by LibreOffice, in preference order.
#[cfg(windows)]
const EXECUTABLE_NAMES: &[&str] = &["soffice.exe", "soffice.com"];
#[cfg(not(windows))]
const EXECUTABLE_NAMES: &[&str] = &["soffice", "libreoffice"];

/// Errors from converter discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No installation was found anywhere.
    #[error("LibreOffice not found. Searched: configured '{configured}', PATH, and common paths")]
    NotFound {
        /// The configured binary that was searched for first.
        configured: String,
    },

    /// An explicit path was configured but does not exist.
    #[error("Configured converter path does not exist: {path}")]
    PathMissing {
        /// The configured path.
        path: PathBuf,
    },

    /// A directory was configured but holds no known executable.
    #[error("No LibreOffice executable found in {install_dir}")]
    ExecutableMissing {
        /// The directory that was searched.
        install_dir: PathBuf,
    },
}

/// How the installation was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMethod {
    /// Explicitly configured by the user.
    ExplicitConfig,
    /// Found via the system PATH environment variable.
    SystemPath,
    /// Found in a common installation directory.
    CommonPath,
}

/// A located converter executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInstallation {
    /// Full path to the executable.
    pub executable: PathBuf,
    /// Directory holding the executable.
    pub install_dir: PathBuf,
    /// How the installation was discovered.
    pub discovery_method: DiscoveryMethod,
}

impl ToolInstallation {
    fn new(executable: PathBuf, discovery_method: DiscoveryMethod) -> Self {
        let install_dir = executable
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            executable,
            install_dir,
            discovery_method,
        }
    }

    /// One-line description for diagnostics.
    pub fn summary(&self) -> String {
        let method = match self.discovery_method {
            DiscoveryMethod::ExplicitConfig => "configured",
            DiscoveryMethod::SystemPath => "PATH",
            DiscoveryMethod::CommonPath => "common install path",
        };
        format!("{} (via {})", self.executable.display(), method)
    }
}

/// Converter discovery engine.
pub struct ToolDiscovery;

impl ToolDiscovery {
    /// Locate the converter, starting from the configured binary.
    ///
    /// A configured value containing a path separator is treated as an
    /// explicit path and is not searched for elsewhere.
    pub fn discover(configured: &str) -> Result<ToolInstallation, DiscoveryError> {
        let configured_path = Path::new(configured);
        if configured_path.components().count() > 1 || configured_path.is_absolute() {
            return Self::from_explicit_path(configured_path);
        }

        let names = std::iter::once(configured)
            .filter(|name| !name.is_empty())
            .chain(EXECUTABLE_NAMES.iter().copied());
        for name in names {
            match which::which(name) {
                Ok(executable) => {
                    info!(path = %executable.display(), "Found converter in system PATH");
                    return Ok(ToolInstallation::new(executable, DiscoveryMethod::SystemPath));
                }
                Err(e) => debug!(name, error = %e, "Not on PATH"),
            }
        }

        for dir in Self::common_install_paths() {
            if let Some(executable) = Self::find_executable_in(&dir) {
                info!(path = %executable.display(), "Found converter in common installation path");
                return Ok(ToolInstallation::new(executable, DiscoveryMethod::CommonPath));
            }
        }

        Err(DiscoveryError::NotFound {
            configured: configured.to_string(),
        })
    }

    /// Validate an explicitly configured executable or install directory.
    pub fn from_explicit_path(path: &Path) -> Result<ToolInstallation, DiscoveryError> {
        if !path.exists() {
            return Err(DiscoveryError::PathMissing {
                path: path.to_path_buf(),
            });
        }

        if path.is_dir() {
            return Self::find_executable_in(path)
                .map(|exe| ToolInstallation::new(exe, DiscoveryMethod::ExplicitConfig))
                .ok_or_else(|| DiscoveryError::ExecutableMissing {
                    install_dir: path.to_path_buf(),
                });
        }

        Ok(ToolInstallation::new(
            path.to_path_buf(),
            DiscoveryMethod::ExplicitConfig,
        ))
    }

    /// Look for a known executable in `dir` or its `program` subdirectory.
    fn find_executable_in(dir: &Path) -> Option<PathBuf> {
        [dir.to_path_buf(), dir.join("program")]
            .into_iter()
            .flat_map(|d| EXECUTABLE_NAMES.iter().map(move |name| d.join(name)))
            .find(|candidate| candidate.is_file())
    }

    /// Generate common installation path candidates.
    fn common_install_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(windows)]
        {
            for var in ["ProgramFiles", "ProgramFiles(x86)"] {
                if let Ok(pf) = std::env::var(var) {
                    paths.push(PathBuf::from(pf).join("LibreOffice"));
                }
            }
            paths.push(PathBuf::from("C:/Program Files/LibreOffice"));
        }

        #[cfg(target_os = "macos")]
        {
            paths.push(PathBuf::from("/Applications/LibreOffice.app/Contents/MacOS"));
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            paths.push(PathBuf::from("/usr/lib/libreoffice"));
            paths.push(PathBuf::from("/usr/lib64/libreoffice"));
            paths.push(PathBuf::from("/opt/libreoffice"));
            paths.push(PathBuf::from("/snap/bin"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_paths_not_empty() {
        assert!(!ToolDiscovery::common_install_paths().is_empty());
    }

    #[test]
    fn test_explicit_path_nonexistent() {
        let result = ToolDiscovery::from_explicit_path(Path::new("/nonexistent/soffice"));
        assert!(matches!(result, Err(DiscoveryError::PathMissing { .. })));
    }

    #[test]
    fn test_explicit_path_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let exe = temp.path().join("my-office");
        std::fs::write(&exe, "#!/bin/sh\n").expect("write");

        let installation = ToolDiscovery::from_explicit_path(&exe).expect("ok");
        assert_eq!(installation.executable, exe);
        assert_eq!(installation.install_dir, temp.path());
        assert_eq!(
            installation.discovery_method,
            DiscoveryMethod::ExplicitConfig
        );
    }

    #[test]
    fn test_explicit_directory_with_program_subdir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let program = temp.path().join("program");
        std::fs::create_dir(&program).expect("mkdir");
        let exe = program.join(EXECUTABLE_NAMES[0]);
        std::fs::write(&exe, "").expect("write");

        let installation = ToolDiscovery::from_explicit_path(temp.path()).expect("ok");
        assert_eq!(installation.executable, exe);
        assert_eq!(installation.install_dir, program);
    }

    #[test]
    fn test_explicit_directory_without_executable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let result = ToolDiscovery::from_explicit_path(temp.path());
        assert!(matches!(
            result,
            Err(DiscoveryError::ExecutableMissing { .. })
        ));
    }

    #[test]
    fn test_discover_absolute_path_skips_search() {
        let temp = tempfile::tempdir().expect("tempdir");
        let exe = temp.path().join("soffice-custom");
        std::fs::write(&exe, "").expect("write");

        let installation =
            ToolDiscovery::discover(&exe.to_string_lossy()).expect("should resolve");
        assert_eq!(installation.executable, exe);
        assert_eq!(
            installation.discovery_method,
            DiscoveryMethod::ExplicitConfig
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_finds_program_on_path() {
        // `sh` is always on PATH on unix hosts
        let installation = ToolDiscovery::discover("sh").expect("should resolve");
        assert_eq!(installation.discovery_method, DiscoveryMethod::SystemPath);
        assert!(installation.summary().contains("via PATH"));
    }
}
