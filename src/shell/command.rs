//! Check command execution.
//!
//! Every check runs as its own process, wrapped in `timeout(1)`:
//!
//! ```text
//! timeout <secs>s bash -c '<command>'
//! ```
//!
//! in the system temp directory and at the lowest scheduling priority.
//! Execution is split into [`CheckRunner::start`], which spawns the process
//! and returns immediately, and [`CheckHandle::wait`], which collects its
//! output. [`CheckRunner::run`] starts every check before waiting on any, so
//! a batch takes about as long as its slowest check.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, warn, Span};

use super::platform::{exit_code, lower_priority};
use crate::checks::CheckDefinition;

/// Exit status reported by `timeout(1)` when the limit is hit.
pub const TIMEOUT_STATUS: i32 = 124;

/// Exit status used when a check could not be started at all.
pub const SPAWN_FAILURE_STATUS: i32 = 127;

/// Captured output of one check, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub description: String,
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

/// Options shared by every check in a batch.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Shell used to interpret check commands.
    pub shell: String,
    /// Working directory of check processes.
    pub working_dir: PathBuf,
    /// Niceness applied before exec.
    pub niceness: i32,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            working_dir: std::env::temp_dir(),
            niceness: 19,
        }
    }
}

/// Launches check processes.
#[derive(Debug, Clone)]
pub struct CheckRunner {
    options: RunnerOptions,
    span: Span,
}

/// A started check whose output has not been collected yet.
pub struct CheckHandle {
    description: String,
    started: Instant,
    state: HandleState,
    span: Span,
}

enum HandleState {
    Running {
        child: Child,
        stdout: Option<JoinHandle<PipeOutput>>,
        stderr: Option<JoinHandle<PipeOutput>>,
    },
    Failed(String),
}

impl CheckRunner {
    /// Create a runner.
    pub fn new(options: RunnerOptions) -> Self {
        Self {
            options,
            span: Span::none(),
        }
    }

    /// Attach the span that runner events are recorded in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Runner options.
    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Spawn a check without waiting for it.
    ///
    /// Never fails: a process that cannot be spawned produces a handle that
    /// reports [`SPAWN_FAILURE_STATUS`].
    pub fn start(&self, check: &CheckDefinition) -> CheckHandle {
        let _enter = self.span.enter();

        let mut cmd = Command::new("timeout");
        cmd.arg(check.timeout.to_arg())
            .arg(&self.options.shell)
            .arg("-c")
            .arg(&check.command)
            .current_dir(&self.options.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        lower_priority(&mut cmd, self.options.niceness);

        debug!(
            "starting '{}': {} (timeout {})",
            check.description, check.command, check.timeout
        );

        let state = match cmd.spawn() {
            Ok(mut child) => {
                // Both pipes must drain while the child runs.
                let stdout = child.stdout.take().map(spawn_reader);
                let stderr = child.stderr.take().map(spawn_reader);
                HandleState::Running {
                    child,
                    stdout,
                    stderr,
                }
            }
            Err(e) => {
                warn!("failed to start '{}': {}", check.description, e);
                HandleState::Failed(format!("ERROR: failed to start command: {e}"))
            }
        };

        CheckHandle {
            description: check.description.clone(),
            started: Instant::now(),
            state,
            span: self.span.clone(),
        }
    }

    /// Run all checks concurrently, returning outputs in check order.
    pub fn run(&self, checks: &[CheckDefinition]) -> Vec<RawOutput> {
        let handles: Vec<CheckHandle> = checks.iter().map(|check| self.start(check)).collect();
        handles.into_iter().map(CheckHandle::wait).collect()
    }

    /// Run checks one after another.
    pub fn run_sequential(&self, checks: &[CheckDefinition]) -> Vec<RawOutput> {
        checks.iter().map(|check| self.start(check).wait()).collect()
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new(RunnerOptions::default())
    }
}

impl CheckHandle {
    /// Description of the check this handle belongs to.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Block until the check has exited and its output is drained.
    ///
    /// Bounded by the check's timeout.
    pub fn wait(self) -> RawOutput {
        let _enter = self.span.enter();

        let output = match self.state {
            HandleState::Failed(message) => RawOutput {
                description: self.description,
                stdout: String::new(),
                stderr: message,
                status: SPAWN_FAILURE_STATUS,
            },
            HandleState::Running {
                mut child,
                stdout,
                stderr,
            } => {
                let (stdout, stdout_error) = join_reader(stdout);
                let (mut stderr, stderr_error) = join_reader(stderr);
                for error in [stdout_error, stderr_error].into_iter().flatten() {
                    warn!("'{}': {}", self.description, error);
                    stderr.push('\n');
                    stderr.push_str(&error);
                }

                let status = match child.wait() {
                    Ok(status) => exit_code(status),
                    Err(e) => {
                        stderr.push_str(&format!("\nERROR: failed to wait for command: {e}"));
                        -1
                    }
                };

                RawOutput {
                    description: self.description,
                    stdout,
                    stderr,
                    status,
                }
            }
        };

        debug!(
            "'{}' exited with status {} after {}ms",
            output.description,
            output.status,
            self.started.elapsed().as_millis()
        );

        output
    }
}

/// Text read from a pipe, and the read error that cut it short, if any.
type PipeOutput = (String, Option<String>);

fn spawn_reader<R: Read + Send + 'static>(pipe: R) -> JoinHandle<PipeOutput> {
    thread::spawn(move || read_pipe(pipe))
}

fn read_pipe<R: Read>(mut pipe: R) -> PipeOutput {
    let mut buf = Vec::new();
    let error = pipe
        .read_to_end(&mut buf)
        .err()
        .map(|e| format!("ERROR: failed to read output: {e}"));
    (String::from_utf8_lossy(&buf).into_owned(), error)
}

fn join_reader(handle: Option<JoinHandle<PipeOutput>>) -> PipeOutput {
    match handle.map(JoinHandle::join) {
        Some(Ok(output)) => output,
        Some(Err(_)) => (
            String::new(),
            Some("ERROR: output reader panicked".to_string()),
        ),
        None => Default::default(),
    }
}
