use crate::domain::ToolsConfig;
use crate::ports::ProcessRunner;

/// Application context holding dependencies for command execution.
pub struct AppContext<R: ProcessRunner> {
    runner: R,
    tools: ToolsConfig,
}

impl<R: ProcessRunner> AppContext<R> {
    /// Create a new application context.
    pub fn new(runner: R, tools: ToolsConfig) -> Self {
        Self { runner, tools }
    }

    /// Get a reference to the process runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Get a reference to the tool configuration.
    pub fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolsConfig {
        &mut self.tools
    }
}
