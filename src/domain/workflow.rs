//! Gating state machine for the project workflow.
//!
//! Transitions are pure: every method takes the state by value and returns
//! the next one, so front ends can hold a plain `WorkflowState` and replace it
//! after each event.

use std::fmt;

use super::AppError;

/// User-facing operations gated by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Scaffold,
    Build,
    Run,
    InitRepo,
    OpenEditor,
}

impl Action {
    pub const ALL: [Action; 5] =
        [Action::Scaffold, Action::Build, Action::Run, Action::InitRepo, Action::OpenEditor];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Scaffold => "create the project",
            Action::Build => "build the project",
            Action::Run => "run the executable",
            Action::InitRepo => "initialize a git repository",
            Action::OpenEditor => "open the editor",
        };
        f.write_str(label)
    }
}

/// Coarse workflow phase derived from a [`WorkflowState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    DirSelected,
    NameAndDirSet,
    Created,
    Built,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Empty => "awaiting a name and directory",
            Phase::DirSelected => "awaiting a name",
            Phase::NameAndDirSet => "not created yet",
            Phase::Created => "created, not built",
            Phase::Built => "built",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowState {
    directory_selected: bool,
    name_entered: bool,
    created: bool,
    built: bool,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a project discovered on disk rather than created in this process.
    pub fn observed(created: bool, built: bool) -> Self {
        Self { directory_selected: true, name_entered: true, created, built: created && built }
    }

    pub fn with_directory(self, selected: bool) -> Self {
        Self { directory_selected: selected, ..self }
    }

    pub fn with_name(self, entered: bool) -> Self {
        Self { name_entered: entered, ..self }
    }

    pub fn directory_selected(&self) -> bool {
        self.directory_selected
    }

    pub fn name_entered(&self) -> bool {
        self.name_entered
    }

    pub fn created(&self) -> bool {
        self.created
    }

    pub fn built(&self) -> bool {
        self.built
    }

    pub fn phase(&self) -> Phase {
        if self.built {
            Phase::Built
        } else if self.created {
            Phase::Created
        } else if self.directory_selected && self.name_entered {
            Phase::NameAndDirSet
        } else if self.directory_selected {
            Phase::DirSelected
        } else {
            Phase::Empty
        }
    }

    pub fn permits(&self, action: Action) -> bool {
        match action {
            Action::Scaffold => self.directory_selected && self.name_entered && !self.created,
            Action::Build | Action::OpenEditor => self.created,
            Action::Run => self.built,
            Action::InitRepo => self.directory_selected || self.created,
        }
    }

    /// Actions currently available, in menu order.
    pub fn permitted_actions(&self) -> Vec<Action> {
        Action::ALL.into_iter().filter(|action| self.permits(*action)).collect()
    }

    pub fn check(&self, action: Action) -> Result<(), AppError> {
        if self.permits(action) {
            Ok(())
        } else {
            Err(AppError::ActionNotPermitted { action, phase: self.phase() })
        }
    }

    pub fn scaffolded(self) -> Result<Self, AppError> {
        self.check(Action::Scaffold)?;
        Ok(Self { created: true, ..self })
    }

    pub fn build_succeeded(self) -> Result<Self, AppError> {
        self.check(Action::Build)?;
        Ok(Self { built: true, ..self })
    }

    /// A failed build leaves the project created but not built.
    pub fn build_failed(self) -> Self {
        Self { built: false, ..self }
    }
}
