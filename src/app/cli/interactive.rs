//! Prompt-driven front end over [`Session`].

use std::path::Path;

use dialoguer::{Input, Select};

use super::{print_milestone, print_output};
use crate::app::{Session, api};
use crate::domain::{Action, AppError, BuildType, LibraryVersion};
use crate::ports::ProcessRunner;

#[derive(Debug, Clone, Copy)]
enum MenuEntry {
    Name,
    Directory,
    LibraryVersion,
    BuildType,
    IgnoreFile,
    Repository,
    Action(Action),
    Quit,
}

/// Run the interactive loop until the user quits or cancels.
pub fn run_session(config_path: Option<&Path>) -> Result<(), AppError> {
    let mut session = Session::new(api::create_context(config_path)?);

    loop {
        print_status(&session);

        let entries = menu_entries(&session);
        let labels: Vec<String> = entries.iter().map(|entry| label(&session, *entry)).collect();
        let selection = Select::new()
            .with_prompt("Choose an action")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|err| AppError::Prompt(format!("Failed to select action: {}", err)))?;

        let entry = match selection {
            Some(index) => entries[index],
            None => return Ok(()),
        };
        if matches!(entry, MenuEntry::Quit) {
            return Ok(());
        }

        // Failures end only the chosen action; the session continues.
        if let Err(err) = apply(&mut session, entry) {
            eprintln!("❌ {}", err);
        }
    }
}

fn menu_entries<R: ProcessRunner>(session: &Session<R>) -> Vec<MenuEntry> {
    let state = session.state();
    let mut entries = Vec::new();
    if !state.created() {
        entries.extend([
            MenuEntry::Name,
            MenuEntry::Directory,
            MenuEntry::LibraryVersion,
            MenuEntry::BuildType,
            MenuEntry::IgnoreFile,
            MenuEntry::Repository,
        ]);
    }
    entries.extend(state.permitted_actions().into_iter().map(MenuEntry::Action));
    entries.push(MenuEntry::Quit);
    entries
}

fn label<R: ProcessRunner>(session: &Session<R>, entry: MenuEntry) -> String {
    match entry {
        MenuEntry::Name => match session.name() {
            Some(name) => format!("Project name: {}", name),
            None => "Project name: (not set)".to_string(),
        },
        MenuEntry::Directory => match session.directory() {
            Some(dir) => format!("Directory: {}", dir.display()),
            None => "Directory: (not set)".to_string(),
        },
        MenuEntry::LibraryVersion => format!("SFML version: {}", session.library_version()),
        MenuEntry::BuildType => format!("Build type: {}", session.build_type()),
        MenuEntry::IgnoreFile => format!("Generate .gitignore: {}", on_off(session.generate_ignore_file())),
        MenuEntry::Repository => format!("Run git init: {}", on_off(session.initialize_repository())),
        MenuEntry::Action(Action::Scaffold) => "Create project".to_string(),
        MenuEntry::Action(Action::Build) => "Build project".to_string(),
        MenuEntry::Action(Action::Run) => "Run project".to_string(),
        MenuEntry::Action(Action::InitRepo) => "Create git repo".to_string(),
        MenuEntry::Action(Action::OpenEditor) => "Open in editor".to_string(),
        MenuEntry::Quit => "Quit".to_string(),
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn print_status<R: ProcessRunner>(session: &Session<R>) {
    let state = session.state();
    match session.project() {
        Some(project) => println!("\n{} ({})", project.name, state.phase()),
        None => println!("\nNew project ({})", state.phase()),
    }
}

fn apply<R: ProcessRunner>(session: &mut Session<R>, entry: MenuEntry) -> Result<(), AppError> {
    match entry {
        MenuEntry::Name => {
            let value: String = Input::new()
                .with_prompt("Project name")
                .allow_empty(true)
                .interact_text()
                .map_err(|err| AppError::Prompt(format!("Failed to read project name: {}", err)))?;
            session.set_name(&value)
        }
        MenuEntry::Directory => {
            let default = std::env::current_dir()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default();
            let value: String = Input::new()
                .with_prompt("Project directory")
                .default(default)
                .interact_text()
                .map_err(|err| AppError::Prompt(format!("Failed to read directory: {}", err)))?;
            session.select_directory(value.trim())
        }
        MenuEntry::LibraryVersion => {
            let items: Vec<&str> = LibraryVersion::ALL.iter().map(LibraryVersion::as_str).collect();
            let current = LibraryVersion::ALL
                .iter()
                .position(|version| *version == session.library_version())
                .unwrap_or(0);
            if let Some(index) = select("SFML version", &items, current)? {
                session.set_library_version(LibraryVersion::ALL[index])?;
            }
            Ok(())
        }
        MenuEntry::BuildType => {
            let items: Vec<&str> = BuildType::ALL.iter().map(BuildType::as_str).collect();
            let current = BuildType::ALL
                .iter()
                .position(|build_type| *build_type == session.build_type())
                .unwrap_or(0);
            if let Some(index) = select("Build type", &items, current)? {
                session.set_build_type(BuildType::ALL[index])?;
            }
            Ok(())
        }
        MenuEntry::IgnoreFile => {
            let enabled = session.generate_ignore_file();
            session.set_generate_ignore_file(!enabled)
        }
        MenuEntry::Repository => {
            let enabled = session.initialize_repository();
            session.set_initialize_repository(!enabled)
        }
        MenuEntry::Action(Action::Scaffold) => {
            let layout = session.create()?;
            println!("✅ Created project at {}", layout.root().display());
            Ok(())
        }
        MenuEntry::Action(Action::Build) => {
            session.build(&mut print_milestone)?;
            println!("✅ Build completed successfully");
            Ok(())
        }
        MenuEntry::Action(Action::Run) => {
            let report = session.run()?;
            print_output(&report);
            Ok(())
        }
        MenuEntry::Action(Action::InitRepo) => {
            session.init_repo()?;
            println!("✅ Git repository initialized");
            Ok(())
        }
        MenuEntry::Action(Action::OpenEditor) => {
            let report = session.open_in_editor()?;
            println!("✅ Opened editor ({})", report.command);
            Ok(())
        }
        MenuEntry::Quit => Ok(()),
    }
}

fn select(prompt: &str, items: &[&str], default: usize) -> Result<Option<usize>, AppError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact_opt()
        .map_err(|err| AppError::Prompt(format!("Failed to select {}: {}", prompt, err)))
}
