//! External converter process execution.
//!
//! Runs the converter as a child process with empty stdin and captured
//! stdout/stderr. Pipes are drained to completion and the child is killed
//! if the future is dropped, so no descriptors outlive a call.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::ConversionError;

/// A fully built invocation of the external converter.
#[derive(Debug, Clone)]
pub struct ConversionCommand {
    /// Executable name or path
    pub program: OsString,
    /// Arguments in order
    pub args: Vec<OsString>,
    /// Environment overrides for the child
    pub env_vars: BTreeMap<String, OsString>,
    /// Optional wall-clock limit
    pub timeout: Option<Duration>,
}

impl ConversionCommand {
    /// `<bin> --headless --convert-to <ext> <source> --outdir <outdir>`
    pub fn headless(
        program: impl Into<OsString>,
        output_extension: &str,
        source: &Path,
        outdir: &Path,
    ) -> Self {
        Self {
            program: program.into(),
            args: vec![
                "--headless".into(),
                "--convert-to".into(),
                output_extension.into(),
                source.as_os_str().to_owned(),
                "--outdir".into(),
                outdir.as_os_str().to_owned(),
            ],
            env_vars: BTreeMap::new(),
            timeout: None,
        }
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Limit how long the child may run.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shell-style rendering of the command line, for logs.
    pub fn rendered(&self) -> String {
        let env = self
            .env_vars
            .iter()
            .map(|(k, v)| format!("{}={}", k, shell_quote(v)));
        let program = std::iter::once(self.program.to_string_lossy().into_owned());
        let args = self.args.iter().map(|a| shell_quote(a));

        env.chain(program).chain(args).collect::<Vec<_>>().join(" ")
    }
}

/// Single-quote `arg` unless it only contains shell-safe characters.
fn shell_quote(arg: &OsStr) -> String {
    let s = arg.to_string_lossy();
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ','));
    if safe {
        s.into_owned()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Captured output of a successful run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Standard output from the process
    pub stdout: String,
    /// Standard error from the process
    pub stderr: String,
    /// Duration of the conversion
    pub duration_ms: u64,
}

/// Executor for running the external converter.
#[derive(Debug, Clone, Default)]
pub struct ConversionExecutor;

impl ConversionExecutor {
    /// Create a new conversion executor
    pub fn new() -> Self {
        Self
    }

    /// Run `command` to completion.
    ///
    /// A non-zero exit status or a failure to start the process yields
    /// `ConversionFailed`; exceeding the timeout yields `Timeout`.
    pub async fn execute(
        &self,
        command: &ConversionCommand,
    ) -> Result<ExecutionResult, ConversionError> {
        let start = Instant::now();
        let program = command.program.to_string_lossy();

        debug!(command = %command.rendered(), "Executing external converter");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        for (key, value) in &command.env_vars {
            cmd.env(key, value);
        }

        let result = match command.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    error!(
                        program = %program,
                        timeout_ms = limit.as_millis() as u64,
                        "External converter timed out"
                    );
                    return Err(ConversionError::Timeout { timeout: limit });
                }
            },
            None => cmd.output().await,
        };

        let output = result.map_err(|e| {
            error!(program = %program, error = %e, "Failed to start external converter");
            ConversionError::ConversionFailed { code: None }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(stdout = %stdout.trim_end(), stderr = %stderr.trim_end(), "Converter output");

        if !output.status.success() {
            let code = output.status.code();
            error!(
                program = %program,
                exit_code = ?code,
                stderr = %stderr.chars().take(500).collect::<String>(),
                "External converter failed"
            );
            return Err(ConversionError::ConversionFailed { code });
        }

        info!(program = %program, duration_ms, "External converter finished");

        Ok(ExecutionResult {
            stdout,
            stderr,
            duration_ms,
        })
    }
}
