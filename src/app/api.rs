//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and a workflow session for one-shot use.

use std::path::Path;

use crate::adapters::{SystemProcessRunner, load_tools_config};
use crate::app::{AppContext, Session};
use crate::services::CommandReport;

pub use crate::domain::{
    AppError, BuildMilestone, BuildResult, BuildType, LibraryVersion, ProjectConfig,
    ProjectLayout,
};

/// Create an `AppContext` backed by real processes and the resolved tool config.
pub fn create_context(
    config_path: Option<&Path>,
) -> Result<AppContext<SystemProcessRunner>, AppError> {
    let tools = load_tools_config(config_path)?;
    Ok(AppContext::new(SystemProcessRunner::new(), tools))
}

/// Generate a new project from `config`.
pub fn create(config: &ProjectConfig, config_path: Option<&Path>) -> Result<ProjectLayout, AppError> {
    let mut session = Session::new(create_context(config_path)?);
    session.set_name(&config.name)?;
    session.select_directory(&config.root_directory)?;
    session.set_library_version(config.library_version)?;
    session.set_build_type(config.build_type)?;
    session.set_generate_ignore_file(config.generate_ignore_file)?;
    session.set_initialize_repository(config.initialize_repository)?;
    session.create()
}

/// Configure and compile the project at `project_dir`.
///
/// Without an override the build type recorded in the project's
/// `CMakeLists.txt` is used.
pub fn build(
    project_dir: &Path,
    build_type: Option<BuildType>,
    config_path: Option<&Path>,
    progress: &mut dyn FnMut(BuildMilestone),
) -> Result<BuildResult, AppError> {
    let mut config = ProjectConfig::from_project_dir(project_dir)?;
    if let Some(build_type) = build_type {
        config = config.with_build_type(build_type);
    }
    let mut session = Session::attach(create_context(config_path)?, config);
    session.build(progress)
}

/// Run the executable of a built project.
pub fn run(project_dir: &Path, config_path: Option<&Path>) -> Result<CommandReport, AppError> {
    let config = ProjectConfig::from_project_dir(project_dir)?;
    Session::attach(create_context(config_path)?, config).run()
}

/// Initialize a git repository in `dir` and commit its contents.
pub fn init_repo(
    dir: &Path,
    message: Option<&str>,
    config_path: Option<&Path>,
) -> Result<Vec<CommandReport>, AppError> {
    let mut ctx = create_context(config_path)?;
    if let Some(message) = message {
        ctx.tools_mut().vcs.commit_message = message.to_string();
    }
    let mut session = Session::new(ctx);
    session.select_directory(dir)?;
    session.init_repo()
}

/// Open a generated project in the configured editor.
pub fn open_in_editor(
    project_dir: &Path,
    config_path: Option<&Path>,
) -> Result<CommandReport, AppError> {
    let config = ProjectConfig::from_project_dir(project_dir)?;
    Session::attach(create_context(config_path)?, config).open_in_editor()
}
