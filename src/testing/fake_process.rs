use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{CommandSpec, ProcessOutput, ProcessRunner};

/// Records commands instead of running them.
///
/// Every program resolves unless marked `missing`; every command exits 0
/// unless a scripted response matches the start of its rendered command line.
#[derive(Default)]
pub struct FakeProcessRunner {
    missing: HashSet<String>,
    responses: Vec<(String, ProcessOutput)>,
    invocations: Mutex<Vec<CommandSpec>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    pub fn respond(mut self, command_prefix: &str, exit_code: i32, stderr: &str) -> Self {
        self.responses.push((
            command_prefix.to_string(),
            ProcessOutput { exit_code: Some(exit_code), stdout: String::new(), stderr: stderr.into() },
        ));
        self
    }

    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.invocations().iter().map(CommandSpec::display).collect()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if self.missing.contains(program) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(program))
        }
    }

    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, AppError> {
        self.invocations.lock().unwrap().push(spec.clone());
        let command = spec.display();
        let output = self
            .responses
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(ProcessOutput { exit_code: Some(0), ..ProcessOutput::default() });
        Ok(output)
    }
}
