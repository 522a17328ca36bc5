//! Subprocess execution for Hiera lookups
//!
//! Runs the lookup executable once per request, blocking until it
//! exits, and republishes its stdout as the fact value. The child's
//! exit status is captured but does not gate success: Hiera prints
//! `nil`-ish text or nothing for missing keys depending on version, so
//! the baseline policy publishes whatever came back and leaves the
//! `rc` for callers that want stricter handling.

use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::request::LookupRequest;

/// Seam between the invoker and the real process spawn, so tests can
/// substitute a recording fake.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output>;
}

/// Spawns the executable via [`std::process::Command`] with captured
/// stdio and no shell in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
    }
}

/// Result of one lookup invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// Effective destination fact name.
    pub fact: String,
    /// Child stdout with trailing newlines stripped.
    pub value: String,
    /// Child exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Captured stderr, surfaced for diagnostics only.
    pub stderr: String,
}

/// Executes [`LookupRequest`]s.
///
/// Stateless apart from its runner; each invocation is an independent
/// child process with no shared mutable state.
#[derive(Debug, Default)]
pub struct LookupInvoker<R = ProcessRunner> {
    runner: R,
}

impl LookupInvoker<ProcessRunner> {
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner,
        }
    }
}

impl<R: CommandRunner> LookupInvoker<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Validate the request, run the executable, and trim its stdout.
    ///
    /// Fails with [`Error::Validation`] before any spawn, with
    /// [`Error::Launch`] when the executable cannot be started, and
    /// with [`Error::Execution`] for any other I/O failure.
    pub fn invoke(&self, request: &LookupRequest) -> Result<LookupOutcome> {
        request.validate()?;

        let args = request.argv();
        debug!(program = %request.path, ?args, "invoking hiera");

        let output = self
            .runner
            .run(&request.path, &args)
            .map_err(|source| classify_spawn_error(&request.path, source))?;

        let value = trim_trailing_newlines(&String::from_utf8_lossy(&output.stdout));
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(
                exit_code = ?output.status.code(),
                stderr = %stderr.trim(),
                "hiera exited non-zero; publishing its output anyway"
            );
        }

        Ok(LookupOutcome {
            fact: request.fact_name().to_string(),
            value,
            exit_code: output.status.code(),
            stderr,
        })
    }
}

/// Not-found and permission failures are launch errors; anything else
/// that surfaces from the spawn is an execution error.
fn classify_spawn_error(program: &str, source: std::io::Error) -> Error {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::Launch {
            program: program.to_string(),
            source,
        },
        _ => Error::execution(source.to_string()),
    }
}

/// Strip trailing newlines (LF or CRLF); all other whitespace is the
/// tool's output and is preserved.
fn trim_trailing_newlines(stdout: &str) -> String {
    stdout.trim_end_matches(['\r', '\n']).to_string()
}
