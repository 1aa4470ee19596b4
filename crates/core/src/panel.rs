//! Per-panel state for one tool form.
//!
//! A [`PanelState`] is owned by exactly one panel and only changes in
//! response to the panel's own actions (start, clear, save) and the events of
//! the session it started.

use log::debug;

use crate::error::{Error, Result};
use crate::execution::{ProcessHandle, SessionEvent};
use crate::termination::{Outcome, TerminationResult};

/// Append-only console text. Only [`OutputBuffer::clear`] shrinks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    chunks: Vec<String>,
}

impl OutputBuffer {
    pub fn append(&mut self, chunk: impl Into<String>) {
        self.chunks.push(chunk.into());
    }

    /// Appends `line` so it starts on a line of its own.
    pub fn append_line(&mut self, line: &str) {
        let needs_break = self
            .chunks
            .iter()
            .rev()
            .find(|chunk| !chunk.is_empty())
            .is_some_and(|chunk| !chunk.ends_with('\n'));

        if needs_break {
            self.chunks.push("\n".to_string());
        }
        self.chunks.push(format!("{line}\n"));
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(String::is_empty)
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.chunks.concat()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveState {
    pub allow_save: bool,
    pub has_saved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct PanelState {
    handle: Option<ProcessHandle>,
    output: OutputBuffer,
    loading: bool,
    save: SaveState,
    last_outcome: Option<Outcome>,
}

impl PanelState {
    /// Enters the loading state for a new invocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRunning`] while a previous invocation has not
    /// terminated yet.
    pub fn begin(&mut self) -> Result<()> {
        if self.loading {
            return Err(Error::AlreadyRunning);
        }

        self.loading = true;
        self.save.allow_save = false;
        self.last_outcome = None;
        Ok(())
    }

    pub fn started(&mut self, handle: ProcessHandle) {
        debug!("Panel tracking pid {}", handle);
        self.handle = Some(handle);
    }

    pub fn append_output(&mut self, chunk: impl Into<String>) {
        self.output.append(chunk);
    }

    /// Records the end of the current invocation and returns its outcome.
    pub fn terminated(&mut self, result: TerminationResult) -> Outcome {
        let outcome = result.outcome();
        self.output.append_line(&result.marker());
        self.handle = None;
        self.loading = false;
        self.save = SaveState {
            allow_save: true,
            has_saved: false,
        };
        self.last_outcome = Some(outcome);
        outcome
    }

    /// Applies one session event. Returns the outcome for a termination.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Outcome> {
        match event {
            SessionEvent::Output(chunk) => {
                self.append_output(chunk);
                None
            }
            SessionEvent::Terminated(result) => Some(self.terminated(result)),
        }
    }

    /// Records that the process could not be started at all.
    pub fn spawn_failed(&mut self, error: &impl std::fmt::Display) {
        self.output.append_line(&format!("Error: {error}"));
        self.handle = None;
        self.loading = false;
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
        self.save = SaveState::default();
        if !self.loading {
            self.last_outcome = None;
        }
    }

    pub fn saved(&mut self) {
        self.save = SaveState {
            allow_save: false,
            has_saved: true,
        };
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.save.allow_save && !self.loading
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.loading {
            return SessionState::Running;
        }

        match self.last_outcome {
            None => SessionState::Idle,
            Some(Outcome::Completed) => SessionState::Completed,
            Some(Outcome::Cancelled) => SessionState::Cancelled,
            Some(Outcome::Failed) => SessionState::Failed,
        }
    }

    #[must_use]
    pub fn handle(&self) -> Option<ProcessHandle> {
        self.handle
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn save_state(&self) -> SaveState {
        self.save
    }

    #[must_use]
    pub fn output(&self) -> String {
        self.output.render()
    }
}
