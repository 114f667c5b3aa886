pub mod process_command;
pub mod tools_config_filesystem;

pub use process_command::SystemProcessRunner;
pub use tools_config_filesystem::{CONFIG_ENV, default_config_path, load_tools_config};
