//! sfml-me: scaffold SFML project skeletons and drive their CMake builds.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{build, create, init_repo, open_in_editor, run};
pub use app::{AppContext, Session};
pub use domain::{
    Action, AppError, BuildMilestone, BuildResult, BuildType, LibraryVersion, Phase,
    ProjectConfig, ProjectLayout, ProjectName, ToolsConfig, WorkflowState,
};
pub use services::CommandReport;
