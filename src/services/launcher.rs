//! Launching the built game, git, and the editor.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{AppError, ProjectConfig, RunSettings, ToolCommand, ToolRole, VcsConfig};
use crate::ports::{CommandSpec, ProcessOutput, ProcessRunner};
use crate::services::template_renderer::render_arguments;

/// A finished command together with its captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    pub command: String,
    pub output: ProcessOutput,
}

/// Run the built executable and wait for it to exit.
///
/// Fails with `ExecutableNotFound` before spawning anything if `path` is missing.
pub fn run_executable<R: ProcessRunner>(
    path: &Path,
    working_dir: &Path,
    settings: &RunSettings,
    runner: &R,
) -> Result<CommandReport, AppError> {
    if !path.exists() {
        return Err(AppError::ExecutableNotFound(path.to_path_buf()));
    }

    let spec = CommandSpec::new(path.to_string_lossy(), working_dir).timeout(settings.timeout());
    info!(executable = %path.display(), "launching executable");
    let output = runner.run(&spec)?;

    if !output.success() {
        return Err(AppError::ExecutionFailed {
            path: path.to_path_buf(),
            exit_code: output.exit_code,
            stderr: output.stderr,
        });
    }

    Ok(CommandReport { command: spec.display(), output })
}

/// `git init` in `dir`.
pub fn init_repo<R: ProcessRunner>(
    dir: &Path,
    vcs: &VcsConfig,
    runner: &R,
) -> Result<CommandReport, AppError> {
    ensure_available(runner, ToolRole::Vcs, &vcs.program)?;
    run_vcs(dir, vcs, runner, &["init"])
}

/// `git add .` followed by `git commit -m <message>`; stops at the first failure.
pub fn stage_and_commit<R: ProcessRunner>(
    dir: &Path,
    vcs: &VcsConfig,
    runner: &R,
) -> Result<Vec<CommandReport>, AppError> {
    ensure_available(runner, ToolRole::Vcs, &vcs.program)?;
    let add = run_vcs(dir, vcs, runner, &["add", "."])?;
    let commit = run_vcs(dir, vcs, runner, &["commit", "-m", &vcs.commit_message])?;
    Ok(vec![add, commit])
}

/// Open the project in the configured editor.
pub fn open_in_editor<R: ProcessRunner>(
    config: &ProjectConfig,
    editor: &ToolCommand,
    runner: &R,
) -> Result<CommandReport, AppError> {
    ensure_available(runner, ToolRole::Editor, &editor.program)?;

    let args = render_arguments(&editor.args, config)?;
    let spec =
        CommandSpec::new(&editor.program, config.project_dir()).args(args).timeout(editor.timeout());
    info!(command = %spec.display(), "opening editor");

    let output = runner.run(&spec).map_err(|err| match err {
        AppError::ProcessFailed { details, .. } => {
            AppError::EditorFailed { program: editor.program.clone(), details }
        }
        other => other,
    })?;

    if !output.success() {
        return Err(AppError::EditorFailed {
            program: editor.program.clone(),
            details: failure_details(&output),
        });
    }

    Ok(CommandReport { command: spec.display(), output })
}

pub(crate) fn ensure_available<R: ProcessRunner>(
    runner: &R,
    role: ToolRole,
    program: &str,
) -> Result<(), AppError> {
    if runner.is_available(program) {
        Ok(())
    } else {
        Err(AppError::ToolNotFound { role: role.to_string(), program: program.to_string() })
    }
}

fn run_vcs<R: ProcessRunner>(
    dir: &Path,
    vcs: &VcsConfig,
    runner: &R,
    args: &[&str],
) -> Result<CommandReport, AppError> {
    let spec = CommandSpec::new(&vcs.program, dir).args(args.iter().copied()).timeout(vcs.timeout());
    let output = runner.run(&spec)?;

    if !output.success() {
        debug!(command = %spec.display(), exit_code = ?output.exit_code, "version control command failed");
        return Err(AppError::VersionControlFailed {
            command: spec.display(),
            details: failure_details(&output),
        });
    }

    Ok(CommandReport { command: spec.display(), output })
}

fn failure_details(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = output.stdout.trim();
    if stdout.is_empty() { "Unknown error".to_string() } else { stdout.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectName, ToolsConfig};
    use crate::testing::FakeProcessRunner;
    use tempfile::TempDir;

    #[test]
    fn missing_executable_is_reported_without_spawning() {
        let tmp = TempDir::new().unwrap();
        let runner = FakeProcessRunner::new();

        let err = run_executable(
            &tmp.path().join("build/Demo"),
            tmp.path(),
            &RunSettings::default(),
            &runner,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::ExecutableNotFound(_)));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn non_zero_exit_is_execution_failure() {
        let tmp = TempDir::new().unwrap();
        let exe = tmp.path().join("Demo");
        std::fs::write(&exe, "").unwrap();
        let exe_str = exe.to_string_lossy().to_string();
        let runner = FakeProcessRunner::new().respond(&exe_str, 3, "segfault");

        let err = run_executable(&exe, tmp.path(), &RunSettings::default(), &runner).unwrap_err();

        match err {
            AppError::ExecutionFailed { exit_code, stderr, .. } => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr, "segfault");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn git_sequence_runs_in_order() {
        let tmp = TempDir::new().unwrap();
        let runner = FakeProcessRunner::new();
        let vcs = VcsConfig::default();

        init_repo(tmp.path(), &vcs, &runner).unwrap();
        let reports = stage_and_commit(tmp.path(), &vcs, &runner).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(
            runner.commands(),
            vec!["git init", "git add .", "git commit -m Initial commit"]
        );
        assert!(runner.invocations().iter().all(|spec| spec.cwd == tmp.path()));
    }

    #[test]
    fn failed_add_aborts_commit() {
        let tmp = TempDir::new().unwrap();
        let runner = FakeProcessRunner::new().respond("git add", 128, "fatal: not a git repository");

        let err = stage_and_commit(tmp.path(), &VcsConfig::default(), &runner).unwrap_err();

        match err {
            AppError::VersionControlFailed { command, details } => {
                assert_eq!(command, "git add .");
                assert!(details.contains("not a git repository"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.commands(), vec!["git add ."]);
    }

    #[test]
    fn missing_git_is_tool_not_found() {
        let tmp = TempDir::new().unwrap();
        let runner = FakeProcessRunner::new().missing("git");

        let err = init_repo(tmp.path(), &VcsConfig::default(), &runner).unwrap_err();

        assert!(matches!(err, AppError::ToolNotFound { ref program, .. } if program == "git"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn editor_receives_project_directory() {
        let tmp = TempDir::new().unwrap();
        let config =
            ProjectConfig::new(ProjectName::new("Demo").unwrap(), tmp.path()).unwrap();
        let runner = FakeProcessRunner::new();

        open_in_editor(&config, &ToolsConfig::default().editor, &runner).unwrap();

        let spec = &runner.invocations()[0];
        assert_eq!(spec.program, "code");
        assert_eq!(spec.args, vec![tmp.path().join("Demo").display().to_string()]);
    }

    #[test]
    fn missing_editor_is_reported() {
        let tmp = TempDir::new().unwrap();
        let config =
            ProjectConfig::new(ProjectName::new("Demo").unwrap(), tmp.path()).unwrap();
        let runner = FakeProcessRunner::new().missing("code");

        let err = open_in_editor(&config, &ToolsConfig::default().editor, &runner).unwrap_err();

        assert!(matches!(err, AppError::ToolNotFound { ref role, .. } if role == "editor"));
    }
}
