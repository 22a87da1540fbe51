//! Shared test helpers for integration tests.
//!
//! Stub converters are small shell scripts that accept the LibreOffice
//! argument layout `--headless --convert-to EXT INPUT --outdir DIR`.

#![allow(dead_code)]
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use office_converter::{ConverterOptions, OfficeConverter};
use tempfile::TempDir;

/// Writes `<stem>.<ext>` into the output directory, containing its own
/// argument list.
pub const WRITES_OUTPUT: &str = r#"
name=$(basename "$4")
printf '%s\n' "$*" > "$6/${name%.*}.$3"
"#;

/// Writes `<stem>.<ext>` containing the child's `HOME`.
pub const WRITES_HOME: &str = r#"
name=$(basename "$4")
printf '%s' "$HOME" > "$6/${name%.*}.$3"
"#;

/// Exits successfully without writing anything.
pub const WRITES_NOTHING: &str = "exit 0\n";

/// Fails after producing output, like a converter that crashed late.
pub const FAILS_AFTER_OUTPUT: &str = r#"
name=$(basename "$4")
printf 'partial' > "$6/${name%.*}.$3"
echo "Error: source file could not be loaded" >&2
exit 81
"#;

/// Test workspace with a source directory and a stub converter.
pub struct TestEnv {
    /// Keeps the scratch directory alive
    pub root: TempDir,
    /// Path to the stub executable
    pub stub: PathBuf,
}

impl TestEnv {
    /// Create a workspace whose stub runs `body`.
    pub fn new(body: &str) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let stub = root.path().join("fake-soffice");
        std::fs::write(&stub, format!("#!/bin/sh\n{body}")).expect("write stub");
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755))
            .expect("chmod stub");
        Self { root, stub }
    }

    /// Canonical root directory.
    pub fn dir(&self) -> PathBuf {
        self.root.path().canonicalize().expect("canonicalize")
    }

    /// Create a source document under the root.
    pub fn source(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::write(&path, b"source document").expect("write source");
        path
    }

    /// Create a subdirectory under the root.
    pub fn subdir(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::create_dir_all(&path).expect("mkdir");
        path
    }

    /// Options pointing at the stub.
    pub fn options(&self) -> ConverterOptions {
        ConverterOptions {
            binary: self.stub.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    /// Open `source` with the stub as converter.
    pub fn converter(&self, source: &Path) -> OfficeConverter {
        OfficeConverter::with_options(source, self.options()).expect("open converter")
    }
}
