use std::fmt;

use super::AppError;

/// Validates a project name for use as a directory name and CMake target.
///
/// Checks:
/// - Non-empty
/// - No path separators (/, \)
/// - Not "." or ".."
/// - Characters are ASCII alphanumeric, '-', or '_'
pub fn validate_project_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    if name == "." || name == ".." {
        return false;
    }
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A validated project name.
///
/// Guarantees:
/// - Non-empty
/// - Contains only ASCII alphanumeric characters, `-`, or `_`
/// - Safe to interpolate verbatim into generated C++ and CMake sources
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and create a new instance. Surrounding whitespace is trimmed.
    pub fn new(name: &str) -> Result<Self, AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyProjectName);
        }
        if validate_project_name(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(AppError::InvalidProjectName(trimmed.to_string()))
        }
    }

    /// Return the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for ProjectName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProjectName> for String {
    fn from(val: ProjectName) -> Self {
        val.0
    }
}
