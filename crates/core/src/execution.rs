//! Launching external tools and supervising them until they exit.
//!
//! A [`ProcessSession`] owns the receiving end of an ordered event channel.
//! A supervisor task forwards every line the process writes on stdout or
//! stderr as [`SessionEvent::Output`], reaps the child, lets the streams
//! drain for a short while and then sends exactly one
//! [`SessionEvent::Terminated`].
//!
//! When elevation is requested the [`ProcessHandle`] belongs to the elevation
//! wrapper. Cancelling it stops the wrapper, which may or may not pass the
//! signal on to the tool it launched.

use std::fmt::{Display, Formatter};
use std::process::Stdio;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};

use crate::config::DEFAULT_ELEVATION_WRAPPER;
use crate::error::{Error, Result};
use crate::invocation::InvocationRequest;
use crate::termination::TerminationResult;

/// How long output may keep flowing once the process itself has exited.
const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Identifies the OS process started for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle(u32);

impl ProcessHandle {
    pub fn from_pid(pid: u32) -> Self {
        Self(pid)
    }

    #[must_use]
    pub fn pid(&self) -> u32 {
        self.0
    }
}

impl Display for ProcessHandle {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Output(String),
    Terminated(TerminationResult),
}

/// Result of a cancellation request. Cancelling never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Signalled,
    NotFound,
    Denied,
}

/// Turns [`InvocationRequest`]s into running processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    pub elevation_wrapper: String,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_ELEVATION_WRAPPER)
    }
}

pub struct ProcessSession {
    handle: ProcessHandle,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl ProcessSession {
    #[must_use]
    pub fn handle(&self) -> ProcessHandle {
        self.handle
    }

    /// Next output chunk or the final termination. Returns `None` once the
    /// termination has been received.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    #[must_use]
    pub fn into_parts(self) -> (ProcessHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        (self.handle, self.events)
    }
}

impl Launcher {
    pub fn new(elevation_wrapper: impl Into<String>) -> Self {
        Self {
            elevation_wrapper: elevation_wrapper.into(),
        }
    }

    /// Starts the requested process without waiting for it.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExecutable`] for an empty executable and
    /// [`Error::Spawn`] if the OS could not create the process. No
    /// termination event exists for a failed spawn.
    pub fn spawn(&self, request: &InvocationRequest) -> Result<ProcessSession> {
        let (program, arguments) = request.command_line(&self.elevation_wrapper)?;

        let mut command = Command::new(&program);
        command
            .args(&arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Terminal signals (Ctrl-C) reach the tool only through `cancel`
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command
            .spawn()
            .map_err(|e| Error::spawn_error(program.clone(), e))?;

        let Some(pid) = child.id() else {
            return Err(Error::Misc(format!(
                "`{program}` exited before its process id could be read"
            )));
        };
        let handle = ProcessHandle::from_pid(pid);

        info!(
            "Started `{}` with pid {} (elevated: {})",
            request, handle, request.privilege_elevation
        );

        let (sender, events) = mpsc::unbounded_channel();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        tokio::spawn(supervise(handle, child, stdout, stderr, sender));

        Ok(ProcessSession { handle, events })
    }

    /// Callback flavor of [`Launcher::spawn`].
    ///
    /// `on_data` is called once per output chunk in order, and
    /// `on_terminate` exactly once after the last chunk.
    ///
    /// # Errors
    ///
    /// Same as [`Launcher::spawn`]; neither callback runs on error.
    pub fn start<D, T>(
        &self,
        request: &InvocationRequest,
        mut on_data: D,
        on_terminate: T,
    ) -> Result<ProcessHandle>
    where
        D: FnMut(String) + Send + 'static,
        T: FnOnce(TerminationResult) + Send + 'static,
    {
        let (handle, mut events) = self.spawn(request)?.into_parts();

        tokio::spawn(async move {
            let mut on_terminate = Some(on_terminate);
            while let Some(event) = events.recv().await {
                match event {
                    SessionEvent::Output(chunk) => on_data(chunk),
                    SessionEvent::Terminated(result) => {
                        if let Some(on_terminate) = on_terminate.take() {
                            on_terminate(result);
                        }
                    }
                }
            }
        });

        Ok(handle)
    }
}

async fn supervise(
    handle: ProcessHandle,
    mut child: Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    sender: mpsc::UnboundedSender<SessionEvent>,
) {
    let readers: Vec<JoinHandle<()>> = [
        stdout.map(|s| tokio::spawn(forward_chunks(s, sender.clone()))),
        stderr.map(|s| tokio::spawn(forward_chunks(s, sender.clone()))),
    ]
    .into_iter()
    .flatten()
    .collect();

    let result = match child.wait().await {
        Ok(status) => TerminationResult::from(status),
        Err(e) => {
            warn!("Failed to collect exit status of pid {}: {}", handle, e);
            TerminationResult::unknown()
        }
    };

    // A descendant that outlives the process may hold the pipes open forever
    let deadline = Instant::now() + OUTPUT_DRAIN_TIMEOUT;
    for mut reader in readers {
        match timeout_at(deadline, &mut reader).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Output reader for pid {} stopped unexpectedly: {}", handle, e),
            Err(_) => {
                debug!("Output of pid {} still open after exit, closing it", handle);
                reader.abort();
                // Wait for the abort so no chunk can follow the termination
                let _ = reader.await;
            }
        }
    }

    info!("Process {} terminated with {}", handle, result);

    if sender.send(SessionEvent::Terminated(result)).is_err() {
        debug!("Nobody is listening for the termination of pid {}", handle);
    }
}

async fn forward_chunks<R: AsyncRead + Unpin>(
    reader: R,
    sender: mpsc::UnboundedSender<SessionEvent>,
) {
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer).await {
            Ok(0) => break,
            Ok(_) => {
                let chunk = String::from_utf8_lossy(&buffer).to_string();
                // Receiver may be gone; keep draining so the child never blocks on a full pipe
                let _ = sender.send(SessionEvent::Output(chunk));
            }
            Err(e) => {
                warn!("Error reading process output: {}", e);
                break;
            }
        }
    }
}

/// Asks the process behind `handle` to stop by sending SIGTERM.
///
/// The signal goes to the whole process group the session started, so
/// helpers the tool forked stop with it. The termination itself is reported
/// by the session once the process actually exits.
#[cfg(unix)]
pub fn cancel(handle: &ProcessHandle) -> CancelOutcome {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let raw_pid = match i32::try_from(handle.pid()) {
        Ok(raw_pid) if raw_pid > 0 => raw_pid,
        _ => return CancelOutcome::NotFound,
    };

    let sent = match kill(Pid::from_raw(-raw_pid), Signal::SIGTERM) {
        Err(Errno::ESRCH) => kill(Pid::from_raw(raw_pid), Signal::SIGTERM),
        sent => sent,
    };

    match sent {
        Ok(()) => {
            info!("Sent SIGTERM to pid {}", handle);
            CancelOutcome::Signalled
        }
        Err(Errno::ESRCH) => {
            debug!("Cancel requested for pid {} but it is no longer running", handle);
            CancelOutcome::NotFound
        }
        Err(e) => {
            warn!("Not allowed to signal pid {}: {}", handle, e);
            CancelOutcome::Denied
        }
    }
}

#[cfg(windows)]
pub fn cancel(handle: &ProcessHandle) -> CancelOutcome {
    let output = std::process::Command::new("taskkill")
        .args(["/PID", &handle.to_string()])
        .output();

    match output {
        Ok(output) if output.status.success() => CancelOutcome::Signalled,
        Ok(output) => {
            debug!(
                "taskkill for pid {} failed: {}",
                handle,
                String::from_utf8_lossy(&output.stderr)
            );
            CancelOutcome::NotFound
        }
        Err(e) => {
            warn!("Failed to run taskkill for pid {}: {}", handle, e);
            CancelOutcome::Denied
        }
    }
}

#[cfg(not(any(unix, windows)))]
pub fn cancel(handle: &ProcessHandle) -> CancelOutcome {
    warn!("Cancelling pid {} is not supported on this platform", handle);
    CancelOutcome::Denied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_displays_pid() {
        assert_eq!(ProcessHandle::from_pid(4242).to_string(), "4242");
    }

    #[test]
    fn test_default_launcher_uses_pkexec() {
        assert_eq!(Launcher::default().elevation_wrapper, "pkexec");
    }

    #[tokio::test]
    async fn test_spawn_rejects_empty_executable() {
        let request = InvocationRequest::new("", Vec::new());
        assert!(matches!(
            Launcher::default().spawn(&request),
            Err(Error::EmptyExecutable)
        ));
    }

    #[tokio::test]
    async fn test_spawn_missing_binary_is_spawn_error() {
        let request = InvocationRequest::new("definitely-not-a-real-tool-7f3a", Vec::new());
        let result = Launcher::default().spawn(&request);
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }
}
