mod common;

use common::TestContext;
use predicates::prelude::*;
use std::fs;

#[test]
fn new_generates_skeleton() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "Demo", "--no-git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 'Demo'"));

    ctx.assert_skeleton_exists("Demo");
    assert!(!ctx.project_dir("Demo").join(".gitignore").exists());
}

#[test]
fn new_honors_version_and_build_type() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "Demo", "--sfml-version", "2.5", "--build-type", "debug", "--no-git"])
        .assert()
        .success();

    let cmake = fs::read_to_string(ctx.project_dir("Demo").join("CMakeLists.txt")).unwrap();
    assert!(cmake.contains("project(Demo"));
    assert!(cmake.contains("set(SFML_VERSION 2.5)"));
    assert!(cmake.contains("set(CMAKE_BUILD_TYPE Debug)"));
}

#[test]
fn new_in_explicit_directory() {
    let ctx = TestContext::new();
    let target = ctx.home().join("games");
    fs::create_dir_all(&target).unwrap();

    ctx.cli()
        .args(["new", "Pong", "--no-git", "--dir"])
        .arg(&target)
        .assert()
        .success();

    assert!(target.join("Pong/src/main.cpp").is_file());
}

#[test]
fn new_appends_to_existing_gitignore() {
    let ctx = TestContext::new();
    let project = ctx.project_dir("Demo");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join(".gitignore"), "*.log").unwrap();

    ctx.cli().args(["new", "Demo", "--gitignore", "--no-git"]).assert().success();

    let content = fs::read_to_string(project.join(".gitignore")).unwrap();
    assert!(content.starts_with("*.log\n"));
    assert!(content.contains("build/"));
}

#[test]
fn new_rejects_invalid_name() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "bad/name", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(fs::read_dir(ctx.work_dir()).unwrap().next().is_none());
}

#[test]
fn new_rejects_blank_name() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "   ", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project name cannot be empty"));
}

#[test]
fn new_rejects_unknown_library_version() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "Demo", "--sfml-version", "3.0", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported SFML version"));

    assert!(!ctx.project_dir("Demo").exists());
}

#[test]
fn new_rejects_missing_directory() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["new", "Demo", "--dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn new_runs_git_init_by_default() {
    let ctx = TestContext::with_tools("[vcs]\nprogram = \"false\"\n");

    ctx.cli()
        .args(["new", "Demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Git error"));

    // Files are written before the repository step.
    ctx.assert_skeleton_exists("Demo");
}

#[test]
fn build_requires_generated_project() {
    let ctx = TestContext::new();
    let dir = ctx.project_dir("Empty");
    fs::create_dir_all(&dir).unwrap();

    ctx.cli()
        .arg("build")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot build the project"));
}

#[test]
fn build_reports_progress() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");

    ctx.cli()
        .arg("build")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("[ 25%] Configuring with CMake"))
        .stdout(predicate::str::contains("[100%] Build complete"))
        .stdout(predicate::str::contains("Build completed successfully (Release)"));

    assert!(project.join("build").is_dir());
}

#[test]
fn build_failure_surfaces_compiler_status() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");
    ctx.write_tools("[configure]\nprogram = \"true\"\n\n[compile]\nprogram = \"false\"\n");

    ctx.cli()
        .arg("build")
        .arg(&project)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[ 50%] Compiling"))
        .stdout(predicate::str::contains("Build complete").not())
        .stderr(predicate::str::contains("Build failed (exit 1)"));
}

#[test]
fn configure_failure_stops_before_compiling() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");
    ctx.write_tools("[configure]\nprogram = \"false\"\n\n[compile]\nprogram = \"true\"\n");

    ctx.cli()
        .arg("build")
        .arg(&project)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Compiling").not())
        .stderr(predicate::str::contains("CMake configuration failed"));
}

#[test]
fn build_rejects_unknown_build_type() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");

    ctx.cli()
        .args(["build", "--build-type", "Fast"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fast"));
}

#[test]
fn run_requires_built_executable() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");

    ctx.cli()
        .arg("run")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot run the executable"));
}

#[cfg(unix)]
#[test]
fn run_forwards_program_output() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");
    ctx.install_executable("Demo", "echo hello from demo");

    ctx.cli()
        .arg("run")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("hello from demo"));
}

#[cfg(unix)]
#[test]
fn run_reports_nonzero_exit() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");
    ctx.install_executable("Demo", "echo boom >&2\nexit 3");

    ctx.cli()
        .arg("run")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 3"))
        .stderr(predicate::str::contains("boom"));
}

#[test]
fn git_runs_configured_program() {
    let ctx = TestContext::new();
    let dir = ctx.project_dir("Repo");
    fs::create_dir_all(&dir).unwrap();

    ctx.cli()
        .arg("git")
        .arg(&dir)
        .args(["--message", "First"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Git repository initialized"));
}

#[test]
fn git_failure_is_reported() {
    let ctx = TestContext::with_tools("[vcs]\nprogram = \"false\"\n");

    ctx.cli()
        .arg("git")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Git error running 'false init'"));
}

#[test]
fn edit_requires_generated_project() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("edit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot open the editor"));
}

#[test]
fn edit_reports_missing_editor() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");
    ctx.write_tools("[editor]\nprogram = \"sfml-me-no-such-editor\"\n");

    ctx.cli()
        .arg("edit")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("editor command 'sfml-me-no-such-editor' not found"));
}

#[test]
fn edit_opens_project() {
    let ctx = TestContext::new();
    let project = ctx.create_project("Demo");

    ctx.cli().arg("edit").arg(&project).assert().success().stdout(predicate::str::contains("Opened"));
}

#[test]
fn invalid_config_is_rejected() {
    let ctx = TestContext::with_tools("[compile]\nprogram = \"true\"\ntimeout_secs = 0\n");

    ctx.cli()
        .args(["new", "Demo", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn explicit_config_flag_overrides_environment() {
    let ctx = TestContext::with_tools("[vcs]\nprogram = \"false\"\n");
    let passing = ctx.home().join("passing.toml");
    fs::write(&passing, common::PASSING_TOOLS).unwrap();

    ctx.cli().arg("--config").arg(&passing).args(["new", "Demo"]).assert().success();
}
