use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::AppError;
use crate::ports::{CommandSpec, ProcessOutput, ProcessRunner, is_explicit_path};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long output pipes may stay open after the child itself has exited.
///
/// A descendant that inherited stdout or stderr keeps the pipe open for as
/// long as it lives; its output is not waited for.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if is_explicit_path(program) {
            let path = program_path(program, &std::env::current_dir().ok()?);
            return path.is_file().then_some(path);
        }
        which::which(program).ok()
    }

    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, AppError> {
        debug!(command = %spec.display(), cwd = %spec.cwd.display(), "spawning process");

        let invoked_from = std::env::current_dir().map_err(|e| AppError::io(".", e))?;
        let mut child = Command::new(program_path(&spec.program, &invoked_from))
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::ProcessFailed {
                command: spec.display(),
                details: e.to_string(),
            })?;

        // Drain both pipes concurrently so a chatty child cannot fill one and stall.
        let stdout = Drain::spawn(child.stdout.take());
        let stderr = Drain::spawn(child.stderr.take());

        let status = match spec.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout, spec)?,
            None => child.wait().map_err(|e| AppError::ProcessFailed {
                command: spec.display(),
                details: e.to_string(),
            })?,
        };

        let grace = Instant::now() + DRAIN_GRACE;
        let (stdout, stdout_closed) = stdout.collect(grace);
        let (stderr, stderr_closed) = stderr.collect(grace);
        if !(stdout_closed && stderr_closed) {
            warn!(command = %spec.display(), "output still held open by a descendant; keeping what was captured");
        }

        let output = ProcessOutput { exit_code: status.code(), stdout, stderr };
        debug!(command = %spec.display(), exit_code = ?output.exit_code, "process finished");
        Ok(output)
    }
}

/// Explicit relative paths are anchored to the invoking directory, never to
/// the command's working directory.
fn program_path(program: &str, invoked_from: &Path) -> PathBuf {
    let path = Path::new(program);
    if is_explicit_path(program) && path.is_relative() {
        invoked_from.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Output read from one pipe on a helper thread.
struct Drain {
    buffer: Arc<Mutex<Vec<u8>>>,
    closed: Receiver<()>,
}

impl Drain {
    fn spawn<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (done, closed) = mpsc::channel();
        let sink = Arc::clone(&buffer);
        thread::spawn(move || {
            if let Some(mut pipe) = pipe {
                let mut chunk = [0u8; 8192];
                loop {
                    match pipe.read(&mut chunk) {
                        Ok(0) => break,
                        Ok(n) => match sink.lock() {
                            Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                            Err(_) => break,
                        },
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(_) => break,
                    }
                }
            }
            let _ = done.send(());
        });
        Self { buffer, closed }
    }

    /// Wait for end of stream until `deadline`, then take what has been read.
    /// The flag reports whether the stream actually closed.
    fn collect(self, deadline: Instant) -> (String, bool) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let closed = self.closed.recv_timeout(remaining).is_ok();
        let bytes = self.buffer.lock().map(|buf| buf.clone()).unwrap_or_default();
        (String::from_utf8_lossy(&bytes).into_owned(), closed)
    }
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    spec: &CommandSpec,
) -> Result<ExitStatus, AppError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(e) => {
                return Err(AppError::ProcessFailed {
                    command: spec.display(),
                    details: e.to_string(),
                });
            }
        }

        if Instant::now() >= deadline {
            warn!(command = %spec.display(), seconds = timeout.as_secs(), "killing timed out process");
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::Timeout { command: spec.display(), seconds: timeout.as_secs() });
        }

        thread::sleep(POLL_INTERVAL);
    }
}
