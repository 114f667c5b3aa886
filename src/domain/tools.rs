//! External tool configuration loaded from `config.toml`.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::AppError;

/// Roles an external program can play in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolRole {
    Configure,
    Compile,
    Vcs,
    Editor,
    Run,
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToolRole::Configure => "configure",
            ToolRole::Compile => "compile",
            ToolRole::Vcs => "vcs",
            ToolRole::Editor => "editor",
            ToolRole::Run => "run",
        };
        f.write_str(label)
    }
}

/// Configuration for tool invocation loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Build-file generation command, run inside `build/`.
    #[serde(default = "default_configure")]
    pub configure: ToolCommand,
    /// Compilation command, run inside `build/`.
    #[serde(default = "default_compile")]
    pub compile: ToolCommand,
    /// Editor opened on the project directory.
    #[serde(default = "default_editor")]
    pub editor: ToolCommand,
    /// Version-control settings.
    #[serde(default)]
    pub vcs: VcsConfig,
    /// Settings for launching the built executable.
    #[serde(default)]
    pub run: RunSettings,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            configure: default_configure(),
            compile: default_compile(),
            editor: default_editor(),
            vcs: VcsConfig::default(),
            run: RunSettings::default(),
        }
    }
}

impl ToolsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.configure.validate(ToolRole::Configure)?;
        self.compile.validate(ToolRole::Compile)?;
        self.editor.validate(ToolRole::Editor)?;
        self.vcs.validate()?;
        validate_timeout(ToolRole::Run, self.run.timeout_secs)?;
        Ok(())
    }
}

/// Parse configuration from string content.
pub fn parse_tools_config(content: &str) -> Result<ToolsConfig, AppError> {
    let config: ToolsConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// A program plus argument templates.
///
/// Arguments are rendered as templates before launch; see
/// `services::template_renderer` for the variables in scope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ToolCommand {
    pub fn new(program: &str, args: &[&str], timeout_secs: Option<u64>) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self, role: ToolRole) -> Result<(), AppError> {
        if self.program.trim().is_empty() {
            return Err(AppError::config_error(format!("{role}.program must not be empty")));
        }
        validate_timeout(role, self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VcsConfig {
    #[serde(default = "default_vcs_program")]
    pub program: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default = "default_vcs_timeout")]
    pub timeout_secs: Option<u64>,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            program: default_vcs_program(),
            commit_message: default_commit_message(),
            timeout_secs: default_vcs_timeout(),
        }
    }
}

impl VcsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.program.trim().is_empty() {
            return Err(AppError::config_error("vcs.program must not be empty"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(AppError::config_error("vcs.commit_message must not be empty"));
        }
        validate_timeout(ToolRole::Vcs, self.timeout_secs)
    }
}

/// The game is interactive, so no timeout applies unless one is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RunSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn validate_timeout(role: ToolRole, timeout_secs: Option<u64>) -> Result<(), AppError> {
    if timeout_secs == Some(0) {
        return Err(AppError::config_error(format!(
            "{role}.timeout_secs must be greater than 0 (omit it to wait indefinitely)"
        )));
    }
    Ok(())
}

fn default_configure() -> ToolCommand {
    ToolCommand::new("cmake", &["..", "-DCMAKE_BUILD_TYPE={{ build_type }}"], Some(600))
}

fn default_compile() -> ToolCommand {
    ToolCommand::new("cmake", &["--build", "."], Some(1800))
}

fn default_editor() -> ToolCommand {
    ToolCommand::new("code", &["{{ project_dir }}"], Some(30))
}

fn default_vcs_program() -> String {
    "git".to_string()
}

fn default_commit_message() -> String {
    "Initial commit".to_string()
}

fn default_vcs_timeout() -> Option<u64> {
    Some(60)
}
