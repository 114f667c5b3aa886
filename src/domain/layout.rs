use std::path::{Path, PathBuf};

/// Subdirectories created under every project root, in creation order.
pub const PROJECT_DIRS: [&str; 4] = ["src", "include", "assets", "build"];

pub const MAIN_SOURCE: &str = "src/main.cpp";
pub const GAME_HEADER: &str = "include/Game.h";
pub const GAME_SOURCE: &str = "src/Game.cpp";
pub const BUILD_SCRIPT: &str = "CMakeLists.txt";
pub const IGNORE_FILE: &str = ".gitignore";
pub const BUILD_DIR: &str = "build";

/// On-disk shape of a generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    executable_name: String,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            root: root.into(),
            executable_name: format!("{}{}", name, std::env::consts::EXE_SUFFIX),
        }
    }

    /// Project directory (`root_directory/name`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directories(&self) -> Vec<PathBuf> {
        PROJECT_DIRS.iter().map(|dir| self.root.join(dir)).collect()
    }

    pub fn main_source(&self) -> PathBuf {
        self.root.join(MAIN_SOURCE)
    }

    pub fn header(&self) -> PathBuf {
        self.root.join(GAME_HEADER)
    }

    pub fn implementation(&self) -> PathBuf {
        self.root.join(GAME_SOURCE)
    }

    pub fn build_script(&self) -> PathBuf {
        self.root.join(BUILD_SCRIPT)
    }

    pub fn ignore_file(&self) -> PathBuf {
        self.root.join(IGNORE_FILE)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// Where a single-config generator leaves the linked binary.
    pub fn executable(&self) -> PathBuf {
        self.build_dir().join(&self.executable_name)
    }

    /// A project counts as generated once its build script is on disk.
    pub fn is_generated(&self) -> bool {
        self.build_script().is_file()
    }

    pub fn is_built(&self) -> bool {
        self.executable().is_file()
    }
}
