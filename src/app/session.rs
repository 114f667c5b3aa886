//! Front-end-agnostic workflow session.
//!
//! A `Session` owns the draft settings a user is editing, the frozen
//! [`ProjectConfig`] once the project exists, and the [`WorkflowState`] that
//! decides which actions are currently allowed. Every action goes through the
//! gate before touching the filesystem or spawning a process.

use std::path::PathBuf;

use tracing::info;

use crate::app::AppContext;
use crate::domain::{
    Action, AppError, BuildMilestone, BuildResult, BuildType, LibraryVersion, ProjectConfig,
    ProjectLayout, ProjectName, WorkflowState,
};
use crate::ports::ProcessRunner;
use crate::services::{CommandReport, build_runner, launcher, scaffolder};

pub struct Session<R: ProcessRunner> {
    ctx: AppContext<R>,
    name: Option<ProjectName>,
    directory: Option<PathBuf>,
    library_version: LibraryVersion,
    build_type: BuildType,
    generate_ignore_file: bool,
    initialize_repository: bool,
    project: Option<ProjectConfig>,
    state: WorkflowState,
}

impl<R: ProcessRunner> Session<R> {
    pub fn new(ctx: AppContext<R>) -> Self {
        Self {
            ctx,
            name: None,
            directory: None,
            library_version: LibraryVersion::default(),
            build_type: BuildType::default(),
            generate_ignore_file: false,
            initialize_repository: true,
            project: None,
            state: WorkflowState::new(),
        }
    }

    /// Resume a project that already exists on disk.
    ///
    /// The state is observed from the layout: a build script means created,
    /// a linked executable means built.
    pub fn attach(ctx: AppContext<R>, config: ProjectConfig) -> Self {
        let layout = config.layout();
        let state = WorkflowState::observed(layout.is_generated(), layout.is_built());
        let mut session = Self::new(ctx);
        session.name = Some(config.name.clone());
        session.directory = Some(config.root_directory.clone());
        session.library_version = config.library_version;
        session.build_type = config.build_type;
        session.generate_ignore_file = config.generate_ignore_file;
        session.initialize_repository = config.initialize_repository;
        session.state = state;
        if state.created() {
            session.project = Some(config);
        }
        session
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn context(&self) -> &AppContext<R> {
        &self.ctx
    }

    pub fn name(&self) -> Option<&ProjectName> {
        self.name.as_ref()
    }

    pub fn directory(&self) -> Option<&PathBuf> {
        self.directory.as_ref()
    }

    pub fn library_version(&self) -> LibraryVersion {
        self.library_version
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    pub fn generate_ignore_file(&self) -> bool {
        self.generate_ignore_file
    }

    pub fn initialize_repository(&self) -> bool {
        self.initialize_repository
    }

    /// The frozen configuration of the created project.
    pub fn project(&self) -> Option<&ProjectConfig> {
        self.project.as_ref()
    }

    /// Enter or clear the project name. An invalid name leaves the session unchanged.
    pub fn set_name(&mut self, raw: &str) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        if raw.trim().is_empty() {
            self.name = None;
        } else {
            self.name = Some(ProjectName::new(raw)?);
        }
        self.state = self.state.with_name(self.name.is_some());
        Ok(())
    }

    /// Choose the directory the project will be created in.
    pub fn select_directory(&mut self, dir: impl Into<PathBuf>) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(AppError::MissingDirectory);
        }
        if !dir.is_dir() {
            return Err(AppError::DirectoryNotFound(dir));
        }
        self.directory = Some(dir);
        self.state = self.state.with_directory(true);
        Ok(())
    }

    pub fn set_library_version(&mut self, version: LibraryVersion) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        self.library_version = version;
        Ok(())
    }

    pub fn set_build_type(&mut self, build_type: BuildType) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        self.build_type = build_type;
        Ok(())
    }

    pub fn set_generate_ignore_file(&mut self, enabled: bool) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        self.generate_ignore_file = enabled;
        Ok(())
    }

    pub fn set_initialize_repository(&mut self, enabled: bool) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        self.initialize_repository = enabled;
        Ok(())
    }

    /// Generate the project from the current draft settings.
    pub fn create(&mut self) -> Result<ProjectLayout, AppError> {
        self.state.check(Action::Scaffold)?;
        let config = self.draft_config()?;

        let layout = scaffolder::scaffold(&config, self.ctx.tools(), self.ctx.runner())?;
        self.state = self.state.scaffolded()?;
        self.project = Some(config);
        Ok(layout)
    }

    /// Configure and compile the created project.
    ///
    /// A failure leaves the session created but not built.
    pub fn build(
        &mut self,
        progress: &mut dyn FnMut(BuildMilestone),
    ) -> Result<BuildResult, AppError> {
        self.state.check(Action::Build)?;
        let config = self.created_project(Action::Build)?;

        let result = build_runner::build(
            config,
            &config.project_dir(),
            self.ctx.tools(),
            self.ctx.runner(),
            progress,
        );
        match result {
            Ok(result) => {
                self.state = self.state.build_succeeded()?;
                Ok(result)
            }
            Err(err) => {
                self.state = self.state.build_failed();
                Err(err)
            }
        }
    }

    /// Launch the built executable from the project directory.
    pub fn run(&self) -> Result<CommandReport, AppError> {
        self.state.check(Action::Run)?;
        let config = self.created_project(Action::Run)?;
        let layout = config.layout();
        launcher::run_executable(
            &layout.executable(),
            layout.root(),
            &self.ctx.tools().run,
            self.ctx.runner(),
        )
    }

    /// `git init`, `git add .`, `git commit` in the project directory, or in the
    /// selected directory when no project has been created yet.
    pub fn init_repo(&self) -> Result<Vec<CommandReport>, AppError> {
        self.state.check(Action::InitRepo)?;
        let dir = match (&self.project, &self.directory) {
            (Some(project), _) => project.project_dir(),
            (None, Some(dir)) => dir.clone(),
            (None, None) => return Err(AppError::MissingDirectory),
        };

        info!(path = %dir.display(), "initializing repository");
        let vcs = &self.ctx.tools().vcs;
        let mut reports = vec![launcher::init_repo(&dir, vcs, self.ctx.runner())?];
        reports.extend(launcher::stage_and_commit(&dir, vcs, self.ctx.runner())?);
        Ok(reports)
    }

    pub fn open_in_editor(&self) -> Result<CommandReport, AppError> {
        self.state.check(Action::OpenEditor)?;
        let config = self.created_project(Action::OpenEditor)?;
        launcher::open_in_editor(config, &self.ctx.tools().editor, self.ctx.runner())
    }

    /// The configuration `create` would use right now.
    pub fn draft_config(&self) -> Result<ProjectConfig, AppError> {
        let name = self.name.clone().ok_or(AppError::EmptyProjectName)?;
        let directory = self.directory.clone().ok_or(AppError::MissingDirectory)?;
        Ok(ProjectConfig::new(name, directory)?
            .with_library_version(self.library_version)
            .with_build_type(self.build_type)
            .with_ignore_file(self.generate_ignore_file)
            .with_repository(self.initialize_repository))
    }

    fn created_project(&self, action: Action) -> Result<&ProjectConfig, AppError> {
        self.project
            .as_ref()
            .ok_or(AppError::ActionNotPermitted { action, phase: self.state.phase() })
    }

    fn ensure_unlocked(&self) -> Result<(), AppError> {
        match &self.project {
            Some(project) => Err(AppError::ProjectLocked(project.name.to_string())),
            None => Ok(()),
        }
    }
}
