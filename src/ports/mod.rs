mod process_runner;

pub use process_runner::{CommandSpec, ProcessOutput, ProcessRunner, is_explicit_path};
