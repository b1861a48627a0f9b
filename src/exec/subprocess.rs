// src/exec/subprocess.rs

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Trait abstracting how external tool invocations are executed.
///
/// Production code uses [`SystemProcessRunner`]; tests can provide an
/// implementation that records calls and scripts exit codes without
/// spawning anything.
pub trait ProcessRunner: Debug {
    /// Run `path` with the given argv, environment, and working directory,
    /// blocking until it exits.
    ///
    /// Returns the exit code; a spawn failure is an error. The child's
    /// environment is exactly `environment`, nothing is inherited.
    fn execute(
        &self,
        path: &Path,
        arguments: &[String],
        environment: &BTreeMap<String, String>,
        working_directory: &Path,
    ) -> Result<i32>;
}

/// Runner that spawns real processes via `std::process::Command`.
///
/// Stdout and stderr are inherited, so tool output interleaves with the
/// formatter's log exactly as it would under any other build driver.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn execute(
        &self,
        path: &Path,
        arguments: &[String],
        environment: &BTreeMap<String, String>,
        working_directory: &Path,
    ) -> Result<i32> {
        debug!(tool = %path.display(), ?arguments, "spawning process");

        let status = Command::new(path)
            .args(arguments)
            .env_clear()
            .envs(environment)
            .current_dir(working_directory)
            .status()
            .with_context(|| format!("spawning {:?}", path))?;

        Ok(status.code().unwrap_or(-1))
    }
}
