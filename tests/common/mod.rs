//! Shared testing utilities for sfml-me CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Tool config that swaps every external program for `true`.
pub const PASSING_TOOLS: &str = r#"[configure]
program = "true"

[compile]
program = "true"

[editor]
program = "true"

[vcs]
program = "true"
"#;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    config_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment whose tools all succeed.
    pub fn new() -> Self {
        Self::with_tools(PASSING_TOOLS)
    }

    /// Create a new isolated environment with a custom tool config.
    pub fn with_tools(config: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        let config_path = root.path().join("config.toml");
        fs::write(&config_path, config).expect("Failed to write tool config");

        Self { root, work_dir, config_path }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory used as the working directory for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Replace the tool config used by subsequent invocations.
    pub fn write_tools(&self, config: &str) {
        fs::write(&self.config_path, config).expect("Failed to rewrite tool config");
    }

    /// Directory a project named `name` is generated into.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Build a command for invoking the compiled `sfml-me` binary in the work directory.
    pub fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `sfml-me` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("sfml-me").expect("Failed to locate sfml-me binary");
        cmd.current_dir(dir.as_ref())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("SFML_ME_CONFIG", &self.config_path)
            .env_remove("SFML_ME_LOG");
        cmd
    }

    /// Generate `name` in the work directory without touching git.
    pub fn create_project(&self, name: &str) -> PathBuf {
        self.cli().args(["new", name, "--no-git"]).assert().success();
        self.project_dir(name)
    }

    /// Place an executable shell script where the build would link the binary.
    #[cfg(unix)]
    pub fn install_executable(&self, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let build_dir = self.project_dir(name).join("build");
        fs::create_dir_all(&build_dir).expect("Failed to create build directory");
        let path = build_dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", script)).expect("Failed to write executable");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark executable");
        path
    }

    /// Assert that the generated skeleton exists for `name`.
    pub fn assert_skeleton_exists(&self, name: &str) {
        let dir = self.project_dir(name);
        for relative in ["src/main.cpp", "src/Game.cpp", "include/Game.h", "CMakeLists.txt"] {
            assert!(dir.join(relative).is_file(), "{} should exist", relative);
        }
        assert!(dir.join("assets").is_dir(), "assets directory should exist");
    }
}
