//! Tool configuration lookup on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, ToolsConfig, parse_tools_config};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SFML_ME_CONFIG";

/// `<config_dir>/sfml-me/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sfml-me").join("config.toml"))
}

/// Load tool configuration.
///
/// An explicit path (flag or `SFML_ME_CONFIG`) must exist. The per-user file
/// is optional; built-in defaults apply when it is absent.
pub fn load_tools_config(explicit: Option<&Path>) -> Result<ToolsConfig, AppError> {
    let from_env = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()).map(PathBuf::from);

    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        return read_config(&path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => read_config(&path),
        _ => {
            debug!("no tool config found; using defaults");
            Ok(ToolsConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<ToolsConfig, AppError> {
    debug!(path = %path.display(), "loading tool config");
    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(path, err))?;
    parse_tools_config(&content)
}
