//! Child-process execution bounded by a wall-clock timeout.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Result, TodoGuardError};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a finished child process.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Run `command` to completion, killing it if it outlives `timeout`.
///
/// Output pipes are drained on background threads so a chatty child cannot
/// block on a full pipe while we wait for it.
///
/// # Errors
/// Returns `TodoGuardError::ExternalTool` if the program is missing, cannot be
/// spawned, or times out.
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<ProcessOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|e| {
        let reason = if e.kind() == io::ErrorKind::NotFound {
            "not installed".to_string()
        } else {
            format!("spawn failed: {e}")
        };
        TodoGuardError::ExternalTool {
            program: program.clone(),
            reason,
        }
    })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait_with_deadline(&mut child, timeout).map_err(|reason| {
        TodoGuardError::ExternalTool {
            program: program.clone(),
            reason,
        }
    })?;

    Ok(ProcessOutput {
        status,
        stdout: join(stdout),
        stderr: join(stderr),
    })
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> std::result::Result<ExitStatus, String> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if started.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("timed out after {}s", timeout.as_secs()));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(format!("wait failed: {e}")),
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
