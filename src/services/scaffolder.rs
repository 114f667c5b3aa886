//! Writes a new project to disk.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{AppError, ProjectConfig, ProjectLayout, ToolsConfig};
use crate::ports::ProcessRunner;
use crate::services::launcher;
use crate::services::template_renderer::{ignore_block, render_project};

/// Generate the project and, if configured, initialize its git repository.
///
/// Existing directories are reused and existing source files are overwritten.
/// A failure leaves whatever was already written in place.
pub fn scaffold<R: ProcessRunner>(
    config: &ProjectConfig,
    tools: &ToolsConfig,
    runner: &R,
) -> Result<ProjectLayout, AppError> {
    let layout = write_project_files(config)?;

    if config.initialize_repository {
        launcher::init_repo(layout.root(), &tools.vcs, runner)?;
    }

    info!(project = %config.name, path = %layout.root().display(), "project scaffolded");
    Ok(layout)
}

/// Everything `scaffold` does except repository initialization.
pub fn write_project_files(config: &ProjectConfig) -> Result<ProjectLayout, AppError> {
    let layout = config.layout();

    for dir in layout.directories() {
        fs::create_dir_all(&dir).map_err(|err| AppError::io(&dir, err))?;
    }

    let rendered = render_project(&config.name, config.library_version, config.build_type)?;
    write_file(&layout.main_source(), &rendered.main_source)?;
    write_file(&layout.header(), &rendered.header)?;
    write_file(&layout.implementation(), &rendered.implementation)?;
    write_file(&layout.build_script(), &rendered.build_script)?;

    if config.generate_ignore_file {
        append_ignore_block(&layout.ignore_file())?;
    }

    Ok(layout)
}

/// Append the ignore block, creating the file if needed.
///
/// Repeated calls append repeated blocks.
pub fn append_ignore_block(path: &Path) -> Result<(), AppError> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
        Err(err) => return Err(AppError::io(path, err)),
    };

    let mut block = String::new();
    if !existing.is_empty() {
        if !existing.ends_with('\n') {
            block.push('\n');
        }
        block.push('\n');
    }
    block.push_str(ignore_block()?);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| AppError::io(path, err))?;
    file.write_all(block.as_bytes()).map_err(|err| AppError::io(path, err))?;
    debug!(path = %path.display(), "ignore block appended");
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    fs::write(path, content).map_err(|err| AppError::io(path, err))?;
    debug!(path = %path.display(), "wrote file");
    Ok(())
}
