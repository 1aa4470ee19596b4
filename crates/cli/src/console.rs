//! Terminal rendering of a tool run.
//!
//! Output chunks are written through unchanged. Status lines (termination
//! markers, spawn errors) are colored by outcome and always start on a line
//! of their own.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use itertools::Itertools;
use tool_panels_core::execution::Launcher;
use tool_panels_core::invocation::InvocationRequest;
use tool_panels_core::termination::Outcome;

/// Process exit status used when the tool was cancelled (128 + SIGINT).
pub const CANCELLED_EXIT_STATUS: u8 = 130;

/// Exit status of `tp` for the outcome of the wrapped tool.
#[must_use]
pub fn exit_status(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Completed => 0,
        Outcome::Cancelled => CANCELLED_EXIT_STATUS,
        Outcome::Failed => 1,
    }
}

/// Exit status of `tp` once it stops waiting for the tool.
///
/// Without a termination the tool was abandoned: after an interrupt that
/// counts as cancelled, otherwise as a failure.
#[must_use]
pub fn final_exit_status(outcome: Option<Outcome>, interrupted: bool) -> u8 {
    match outcome {
        Some(outcome) => exit_status(outcome),
        None if interrupted => CANCELLED_EXIT_STATUS,
        None => 1,
    }
}

#[must_use]
pub fn outcome_color(outcome: Option<Outcome>) -> Color {
    match outcome {
        Some(Outcome::Completed) => Color::Green,
        Some(Outcome::Cancelled) => Color::Yellow,
        Some(Outcome::Failed) | None => Color::Red,
    }
}

/// The command line that will actually be executed, wrapper included.
#[must_use]
pub fn describe_invocation(request: &InvocationRequest, launcher: &Launcher) -> String {
    match request.command_line(&launcher.elevation_wrapper) {
        Ok((program, arguments)) => std::iter::once(program).chain(arguments).join(" "),
        Err(_) => request.to_string(),
    }
}

/// Tracks whether the last thing written to the terminal ended a line.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    mid_line: bool,
}

impl ConsoleWriter {
    /// Writes a raw output chunk.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_chunk<W: Write>(&mut self, out: &mut W, chunk: &str) -> std::io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }

        out.write_all(chunk.as_bytes())?;
        out.flush()?;
        self.mid_line = !chunk.ends_with('\n');
        Ok(())
    }

    /// Writes a colored status line on a line of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_status<W: Write>(
        &mut self,
        out: &mut W,
        line: &str,
        outcome: Option<Outcome>,
    ) -> std::io::Result<()> {
        if self.mid_line {
            queue!(out, Print("\n"))?;
        }

        queue!(
            out,
            SetForegroundColor(outcome_color(outcome)),
            Print(line),
            ResetColor,
            Print("\n")
        )?;
        out.flush()?;
        self.mid_line = false;
        Ok(())
    }
}

/// One line per tool, sorted by name.
#[must_use]
pub fn format_availability(results: &[(String, bool)]) -> String {
    results
        .iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .map(|(tool, available)| {
            let status = if *available { "installed" } else { "not found" };
            format!("{tool}: {status}")
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Outcome::Completed), 0);
        assert_eq!(exit_status(Outcome::Cancelled), 130);
        assert_eq!(exit_status(Outcome::Failed), 1);
    }

    #[test]
    fn test_final_exit_status_without_termination() {
        assert_eq!(final_exit_status(Some(Outcome::Completed), true), 0);
        assert_eq!(final_exit_status(None, true), CANCELLED_EXIT_STATUS);
        assert_eq!(final_exit_status(None, false), 1);
    }

    #[test]
    fn test_outcome_color() {
        assert_eq!(outcome_color(Some(Outcome::Completed)), Color::Green);
        assert_eq!(outcome_color(Some(Outcome::Cancelled)), Color::Yellow);
        assert_eq!(outcome_color(None), Color::Red);
    }

    #[test]
    fn test_status_starts_on_new_line() {
        let mut out = Vec::new();
        let mut console = ConsoleWriter::default();

        console.write_chunk(&mut out, "partial").unwrap();
        console
            .write_status(&mut out, "Process completed successfully.", Some(Outcome::Completed))
            .unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("partial\n"));
        assert!(written.contains("Process completed successfully."));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_status_after_full_line_adds_no_blank_line() {
        let mut out = Vec::new();
        let mut console = ConsoleWriter::default();

        console.write_chunk(&mut out, "host1 found\n").unwrap();
        console.write_status(&mut out, "done", Some(Outcome::Completed)).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(!written.contains("\n\n"));
    }

    #[test]
    fn test_describe_elevated_invocation() {
        let request = InvocationRequest::new("rtgen", vec!["md5".to_string()]).elevated();
        assert_eq!(describe_invocation(&request, &Launcher::default()), "pkexec rtgen md5");
    }

    #[test]
    fn test_format_availability_is_sorted() {
        let results = vec![
            ("rtgen".to_string(), false),
            ("nbtscan".to_string(), true),
        ];
        assert_eq!(
            format_availability(&results),
            "nbtscan: installed\nrtgen: not found"
        );
    }
}
