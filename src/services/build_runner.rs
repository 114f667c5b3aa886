//! Two-phase CMake build.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::layout::BUILD_DIR;
use crate::domain::{
    AppError, BuildMilestone, BuildResult, BuildStage, ProjectConfig, StageOutput, ToolCommand,
    ToolRole, ToolsConfig,
};
use crate::ports::{CommandSpec, ProcessRunner};
use crate::services::launcher::ensure_available;
use crate::services::template_renderer::render_arguments;

/// Configure then compile the project at `project_path`.
///
/// Both commands run inside `project_path/build`, which is created if missing.
/// A failed stage ends the attempt; nothing is retried.
pub fn build<R: ProcessRunner>(
    config: &ProjectConfig,
    project_path: &Path,
    tools: &ToolsConfig,
    runner: &R,
    progress: &mut dyn FnMut(BuildMilestone),
) -> Result<BuildResult, AppError> {
    let build_dir = project_path.join(BUILD_DIR);
    fs::create_dir_all(&build_dir).map_err(|err| AppError::io(&build_dir, err))?;

    progress(BuildMilestone::ConfigureStarted);
    let configure = run_stage(config, &build_dir, &tools.configure, ToolRole::Configure, runner)?;
    if !success(&configure) {
        debug!(exit_code = ?configure.exit_code, "configuration failed");
        return Err(AppError::ConfigurationFailed {
            exit_code: configure.exit_code,
            stderr: configure.stderr,
        });
    }
    progress(BuildMilestone::ConfigureDone);

    let compile = run_stage(config, &build_dir, &tools.compile, ToolRole::Compile, runner)?;
    if !success(&compile) {
        debug!(exit_code = ?compile.exit_code, "compilation failed");
        return Err(AppError::CompilationFailed {
            exit_code: compile.exit_code,
            stderr: compile.stderr,
        });
    }
    progress(BuildMilestone::CompileDone);

    info!(project = %config.name, build_type = %config.build_type, "build succeeded");
    Ok(BuildResult { build_type: config.build_type, configure, compile })
}

fn run_stage<R: ProcessRunner>(
    config: &ProjectConfig,
    build_dir: &Path,
    command: &ToolCommand,
    role: ToolRole,
    runner: &R,
) -> Result<StageOutput, AppError> {
    ensure_available(runner, role, &command.program)?;

    let args = render_arguments(&command.args, config)?;
    let spec = CommandSpec::new(&command.program, build_dir).args(args).timeout(command.timeout());
    info!(stage = %role, command = %spec.display(), "running build stage");
    let output = runner.run(&spec)?;

    let stage = match role {
        ToolRole::Configure => BuildStage::Configure,
        _ => BuildStage::Compile,
    };
    Ok(StageOutput { stage, exit_code: output.exit_code, stdout: output.stdout, stderr: output.stderr })
}

fn success(output: &StageOutput) -> bool {
    output.exit_code == Some(0)
}
