pub mod build;
pub mod error;
pub mod identifiers;
pub mod layout;
pub mod project;
pub mod tools;
pub mod workflow;

pub use build::{BuildMilestone, BuildResult, BuildStage, StageOutput};
pub use error::AppError;
pub use identifiers::ProjectName;
pub use layout::ProjectLayout;
pub use project::{BuildType, LibraryVersion, ProjectConfig};
pub use tools::{RunSettings, ToolCommand, ToolRole, ToolsConfig, VcsConfig, parse_tools_config};
pub use workflow::{Action, Phase, WorkflowState};
