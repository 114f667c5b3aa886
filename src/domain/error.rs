use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::workflow::{Action, Phase};

/// Library-wide error type for sfml-me operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem failure at a specific path.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Project name is empty.
    #[error("Project name cannot be empty")]
    EmptyProjectName,

    /// Project name contains characters unsafe for a path or build-script identifier.
    #[error(
        "Invalid project name '{0}': must be alphanumeric with hyphens or underscores"
    )]
    InvalidProjectName(String),

    /// No root directory was chosen.
    #[error("No project directory selected")]
    MissingDirectory,

    /// The chosen root directory does not exist or is not a directory.
    #[error("Project directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Library version not recognized.
    #[error("Unsupported SFML version '{0}': expected one of 2.5, 2.6")]
    InvalidLibraryVersion(String),

    /// Build type not recognized.
    #[error(
        "Invalid build type '{0}': expected one of Debug, Release, RelWithDebInfo, MinSizeRel"
    )]
    InvalidBuildType(String),

    /// Action attempted in a workflow phase that does not allow it.
    #[error("Cannot {action} (project state: {phase})")]
    ActionNotPermitted { action: Action, phase: Phase },

    /// Project settings were edited after generation started.
    #[error("Project '{0}' has already been created; its settings can no longer change")]
    ProjectLocked(String),

    /// CMake configuration exited non-zero.
    #[error("CMake configuration failed (exit {}):\n{stderr}", exit_label(.exit_code))]
    ConfigurationFailed { exit_code: Option<i32>, stderr: String },

    /// Compilation exited non-zero.
    #[error("Build failed (exit {}):\n{stderr}", exit_label(.exit_code))]
    CompilationFailed { exit_code: Option<i32>, stderr: String },

    /// The built executable is missing.
    #[error("Executable not found at {}. Build the project first.", .0.display())]
    ExecutableNotFound(PathBuf),

    /// The launched executable exited non-zero.
    #[error("'{}' exited with status {}:\n{stderr}", .path.display(), exit_label(.exit_code))]
    ExecutionFailed { path: PathBuf, exit_code: Option<i32>, stderr: String },

    /// A required external program is not resolvable on the search path.
    #[error("{role} command '{program}' not found on PATH")]
    ToolNotFound { role: String, program: String },

    /// A version-control command exited non-zero.
    #[error("Git error running '{command}': {details}")]
    VersionControlFailed { command: String, details: String },

    /// The editor could not be launched for a reason other than a missing binary.
    #[error("Failed to open editor '{program}': {details}")]
    EditorFailed { program: String, details: String },

    /// An external command exceeded its bounded wait.
    #[error("'{command}' did not finish within {seconds}s and was terminated")]
    Timeout { command: String, seconds: u64 },

    /// Spawning or waiting on a process failed.
    #[error("Failed to run '{command}': {details}")]
    ProcessFailed { command: String, details: String },

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Template registration or rendering failed.
    #[error("Failed to render template '{template}': {reason}")]
    Template { template: String, reason: String },

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Io { path: path.into(), source }
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    /// Map onto `io::ErrorKind` for callers that classify failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io { source, .. } => source.kind(),
            AppError::EmptyProjectName
            | AppError::InvalidProjectName(_)
            | AppError::MissingDirectory
            | AppError::InvalidLibraryVersion(_)
            | AppError::InvalidBuildType(_)
            | AppError::InvalidConfig(_)
            | AppError::TomlParseError(_)
            | AppError::Template { .. } => io::ErrorKind::InvalidInput,
            AppError::DirectoryNotFound(_)
            | AppError::ExecutableNotFound(_)
            | AppError::ToolNotFound { .. } => io::ErrorKind::NotFound,
            AppError::ActionNotPermitted { .. } | AppError::ProjectLocked(_) => {
                io::ErrorKind::PermissionDenied
            }
            AppError::Timeout { .. } => io::ErrorKind::TimedOut,
            AppError::ConfigurationFailed { .. }
            | AppError::CompilationFailed { .. }
            | AppError::ExecutionFailed { .. }
            | AppError::VersionControlFailed { .. }
            | AppError::EditorFailed { .. }
            | AppError::ProcessFailed { .. }
            | AppError::Prompt(_) => io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_reports_failing_path() {
        let err = AppError::io(
            "/tmp/x/Demo/src/main.cpp",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/x/Demo/src/main.cpp"));
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn compilation_failure_carries_stderr() {
        let err = AppError::CompilationFailed {
            exit_code: Some(2),
            stderr: "undefined reference to `main'".into(),
        };
        let message = err.to_string();
        assert!(message.contains("exit 2"));
        assert!(message.contains("undefined reference"));
    }

    #[test]
    fn missing_tool_maps_to_not_found() {
        let err = AppError::ToolNotFound { role: "editor".into(), program: "code".into() };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
