//! Project configuration domain models.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{AppError, ProjectName, ProjectLayout};

/// SFML release the generated build script asks CMake for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LibraryVersion {
    V2_5,
    #[default]
    V2_6,
}

impl LibraryVersion {
    /// All supported versions, oldest first.
    pub const ALL: [LibraryVersion; 2] = [LibraryVersion::V2_5, LibraryVersion::V2_6];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryVersion::V2_5 => "2.5",
            LibraryVersion::V2_6 => "2.6",
        }
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2.5" => Ok(LibraryVersion::V2_5),
            "2.6" => Ok(LibraryVersion::V2_6),
            other => Err(AppError::InvalidLibraryVersion(other.to_string())),
        }
    }
}

/// CMake build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const ALL: [BuildType; 4] =
        [BuildType::Debug, BuildType::Release, BuildType::RelWithDebInfo, BuildType::MinSizeRel];

    /// Value passed to `CMAKE_BUILD_TYPE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = AppError;

    /// Case-insensitive, so `debug` and `Debug` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|build_type| build_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidBuildType(s.trim().to_string()))
    }
}

/// Everything needed to generate and build one project.
///
/// Built through [`ProjectConfig::new`], which rejects an empty name or a
/// root directory that does not exist. Treated as immutable once generation
/// starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub name: ProjectName,
    pub root_directory: PathBuf,
    pub library_version: LibraryVersion,
    pub build_type: BuildType,
    pub generate_ignore_file: bool,
    pub initialize_repository: bool,
}

impl ProjectConfig {
    /// Validate the root directory and create a config with default options.
    pub fn new(name: ProjectName, root_directory: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root_directory = root_directory.into();
        if root_directory.as_os_str().is_empty() {
            return Err(AppError::MissingDirectory);
        }
        if !root_directory.is_dir() {
            return Err(AppError::DirectoryNotFound(root_directory));
        }

        Ok(Self {
            name,
            root_directory,
            library_version: LibraryVersion::default(),
            build_type: BuildType::default(),
            generate_ignore_file: false,
            initialize_repository: true,
        })
    }

    /// Reconstruct the config of an already generated project from its directory.
    ///
    /// The directory name becomes the project name and its parent the root.
    pub fn from_project_dir(project_dir: &Path) -> Result<Self, AppError> {
        let project_dir = if project_dir.is_absolute() {
            project_dir.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|err| AppError::io(project_dir, err))?
                .join(project_dir)
        };
        let name = project_dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AppError::InvalidProjectName(project_dir.display().to_string()))?;
        let name = ProjectName::new(name)?;
        let root = project_dir.parent().ok_or(AppError::MissingDirectory)?;
        let config = Self::new(name, root)?;

        let script_path = config.layout().build_script();
        match std::fs::read_to_string(&script_path) {
            Ok(script) => Ok(config.with_recorded_settings(&script)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(config),
            Err(err) => Err(AppError::io(&script_path, err)),
        }
    }

    /// Adopt the build type and library version recorded in a generated
    /// `CMakeLists.txt`. Unrecognized or missing values keep the current ones.
    pub fn with_recorded_settings(mut self, script: &str) -> Self {
        for line in script.lines().map(str::trim) {
            if let Some(value) = recorded_value(line, "CMAKE_BUILD_TYPE") {
                if let Ok(build_type) = value.parse() {
                    self.build_type = build_type;
                }
            } else if let Some(value) = recorded_value(line, "SFML_VERSION") {
                if let Ok(version) = value.parse() {
                    self.library_version = version;
                }
            }
        }
        self
    }

    pub fn with_library_version(mut self, version: LibraryVersion) -> Self {
        self.library_version = version;
        self
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_ignore_file(mut self, enabled: bool) -> Self {
        self.generate_ignore_file = enabled;
        self
    }

    pub fn with_repository(mut self, enabled: bool) -> Self {
        self.initialize_repository = enabled;
        self
    }

    /// Directory holding the generated project (`root_directory/name`).
    pub fn project_dir(&self) -> PathBuf {
        self.root_directory.join(self.name.as_str())
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.project_dir(), &self.name)
    }
}

/// `set(VARIABLE value)` -> `value`.
fn recorded_value<'a>(line: &'a str, variable: &str) -> Option<&'a str> {
    let rest = line.strip_prefix("set(")?.strip_prefix(variable)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.strip_suffix(')').map(str::trim)
}
