//! Termination results and their classification.
//!
//! Every invocation reports exactly one [`TerminationResult`]. Panels turn it
//! into an [`Outcome`] and append the matching marker line to their output.

use std::fmt::{Display, Formatter};
use std::process::ExitStatus;

/// Signal number used for user cancellation (SIGTERM).
pub const CANCEL_SIGNAL: i32 = 15;

const SUCCESS_MARKER: &str = "Process completed successfully.";
const CANCELLED_MARKER: &str = "Process was manually terminated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationResult {
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    Failed,
}

impl TerminationResult {
    pub fn new(exit_code: Option<i32>, signal: Option<i32>) -> Self {
        Self { exit_code, signal }
    }

    /// Used when the exit status could not be collected at all.
    pub fn unknown() -> Self {
        Self::new(None, None)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.exit_code == Some(0) {
            Outcome::Completed
        } else if self.signal == Some(CANCEL_SIGNAL) {
            Outcome::Cancelled
        } else {
            Outcome::Failed
        }
    }

    /// The human readable line appended to a panel's output.
    #[must_use]
    pub fn marker(&self) -> String {
        match self.outcome() {
            Outcome::Completed => SUCCESS_MARKER.to_string(),
            Outcome::Cancelled => CANCELLED_MARKER.to_string(),
            Outcome::Failed => format!(
                "Process terminated with exit code: {} and signal code: {}",
                display_optional(self.exit_code),
                display_optional(self.signal)
            ),
        }
    }
}

impl From<ExitStatus> for TerminationResult {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self::new(status.code(), signal)
    }
}

impl Display for TerminationResult {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "exit code {}, signal {}",
            display_optional(self.exit_code),
            display_optional(self.signal)
        )
    }
}

fn display_optional(value: Option<i32>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_exit_is_completed() {
        let result = TerminationResult::new(Some(0), None);
        assert_eq!(result.outcome(), Outcome::Completed);
        assert_eq!(result.marker(), "Process completed successfully.");
    }

    #[test]
    fn test_sigterm_is_cancelled() {
        assert_eq!(
            TerminationResult::new(None, Some(15)).outcome(),
            Outcome::Cancelled
        );
        // Elevation wrappers report 128 + 15 alongside the signal
        let result = TerminationResult::new(Some(143), Some(15));
        assert_eq!(result.outcome(), Outcome::Cancelled);
        assert_eq!(result.marker(), "Process was manually terminated.");
    }

    #[test]
    fn test_other_exits_are_failed() {
        let result = TerminationResult::new(Some(1), None);
        assert_eq!(result.outcome(), Outcome::Failed);
        assert_eq!(
            result.marker(),
            "Process terminated with exit code: 1 and signal code: none"
        );

        let killed = TerminationResult::new(None, Some(9));
        assert_eq!(killed.outcome(), Outcome::Failed);
        assert_eq!(
            killed.marker(),
            "Process terminated with exit code: none and signal code: 9"
        );
    }

    #[test]
    fn test_zero_exit_wins_over_signal() {
        let result = TerminationResult::new(Some(0), Some(15));
        assert_eq!(result.outcome(), Outcome::Completed);
    }

    #[test]
    fn test_unknown_is_failed() {
        assert_eq!(TerminationResult::unknown().outcome(), Outcome::Failed);
    }
}
