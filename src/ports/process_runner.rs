use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::AppError;

/// A fully rendered command ready to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: cwd.into(), timeout: None }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shell-like rendering for logs and error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for launching external programs.
pub trait ProcessRunner {
    /// Resolve a program on the search path (or as an explicit path).
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Run a command to completion, capturing its output.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`ProcessOutput::exit_code`]. Errors cover spawn failures and timeouts.
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, AppError>;

    fn is_available(&self, program: &str) -> bool {
        self.resolve(program).is_some()
    }
}

/// Whether `program` names a path rather than a bare command.
pub fn is_explicit_path(program: &str) -> bool {
    Path::new(program).components().count() > 1
}
