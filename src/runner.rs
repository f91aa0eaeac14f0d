//! External script execution.
//!
//! Launches a helper script from the scripts directory, drains its stdout
//! line-by-line, and classifies the run from the output text. The child's
//! exit status is deliberately ignored: the helper scripts do not set it
//! reliably, so the error marker in the output stream is the only failure
//! signal.

use crate::constants::ERROR_MARKER;
use anyhow::Context;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// One external invocation: which script, where, and with what arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Script identifier; must be allow-listed by the runner.
    pub script: String,
    /// Target path handed to the script as its first argument.
    pub working_dir: PathBuf,
    /// Extra positional arguments; none may be empty.
    pub args: Vec<String>,
}

impl ExecutionRequest {
    #[must_use]
    pub fn new(script: &str, working_dir: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            script: script.to_string(),
            working_dir: working_dir.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Outcome of one execution: verdict, captured output, and wall-clock time.
#[derive(Debug)]
pub struct ExecutionReport {
    /// False when any output line contained the error marker.
    pub success: bool,
    /// Non-empty output lines, in arrival order.
    pub transcript: Vec<String>,
    /// Elapsed time from spawn to termination.
    pub duration: Duration,
    /// The request this report answers.
    pub request: ExecutionRequest,
}

/// Runs allow-listed helper scripts and reduces their output to a verdict.
pub struct Runner {
    scripts_dir: PathBuf,
    allowed_scripts: Vec<String>,
}

impl Runner {
    #[must_use]
    pub fn new(scripts_dir: impl Into<PathBuf>, allowed_scripts: &[&str]) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            allowed_scripts: allowed_scripts.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Validates and runs one request.
    ///
    /// A script whose output contains the error marker yields `Ok` with
    /// `success: false`; only invalid requests and process-level I/O
    /// failures are errors.
    pub fn execute(&self, request: ExecutionRequest) -> anyhow::Result<ExecutionReport> {
        self.validate(&request)?;

        let script_path = self.scripts_dir.join(&request.script);
        let started = Instant::now();

        let mut child = Command::new(&script_path)
            .arg(&request.working_dir)
            .args(&request.args)
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start script <{}>", script_path.display()))?;

        let stdout = child
            .stdout
            .take()
            .context("Child process has no stdout handle")?;

        let mut transcript = Vec::new();
        let mut success = true;

        for line in BufReader::new(stdout).lines() {
            let line = line.context("Failed to read script output")?;
            if line.is_empty() {
                continue;
            }
            if line.contains(ERROR_MARKER) {
                // Sticky: later clean lines do not rescue the run.
                success = false;
            }
            transcript.push(line);
        }

        child
            .wait()
            .with_context(|| format!("Failed to wait for script <{}>", script_path.display()))?;

        Ok(ExecutionReport {
            success,
            transcript,
            duration: started.elapsed(),
            request,
        })
    }

    /// Rejects malformed requests before any process is spawned. These are
    /// caller programming errors, not recoverable runtime conditions.
    fn validate(&self, request: &ExecutionRequest) -> anyhow::Result<()> {
        if !self.allowed_scripts.contains(&request.script) {
            anyhow::bail!("No such script: '{}'", request.script);
        }
        if request.working_dir.as_os_str().is_empty() {
            anyhow::bail!("Empty working directory path");
        }
        if request.args.iter().any(String::is_empty) {
            anyhow::bail!("Empty arguments are not allowed");
        }
        Ok(())
    }
}
