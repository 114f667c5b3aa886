//! Build pipeline results and progress milestones.

use std::fmt;

use super::BuildType;

/// The two phases of a CMake build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Configure,
    Compile,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStage::Configure => f.write_str("configure"),
            BuildStage::Compile => f.write_str("compile"),
        }
    }
}

/// Coarse progress reported while a build runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildMilestone {
    ConfigureStarted,
    ConfigureDone,
    CompileDone,
}

impl BuildMilestone {
    /// Progress percentage; zero is implied before the first milestone.
    pub fn percent(&self) -> u8 {
        match self {
            BuildMilestone::ConfigureStarted => 25,
            BuildMilestone::ConfigureDone => 50,
            BuildMilestone::CompileDone => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuildMilestone::ConfigureStarted => "Configuring with CMake",
            BuildMilestone::ConfigureDone => "Compiling",
            BuildMilestone::CompileDone => "Build complete",
        }
    }
}

/// Captured output of one build stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub stage: BuildStage,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Outcome of a successful build: both stages' captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Build type the configure stage was given.
    pub build_type: BuildType,
    pub configure: StageOutput,
    pub compile: StageOutput,
}

impl BuildResult {
    pub fn stages(&self) -> [&StageOutput; 2] {
        [&self.configure, &self.compile]
    }
}
