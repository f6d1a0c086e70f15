// SPDX-License-Identifier: PMPL-1.0-or-later

//! Record dispatch to a reporting backend
//!
//! Routing is a closed match over the active UI mode. The windowed path is
//! the only one with side effects owned here: the screen is suspended
//! before the in-memory backend call and resumed after it, whether or not
//! the call succeeded.

pub mod console;
pub mod screen;

use crate::types::{ProblemRecord, ReportFlags};
use anyhow::Result;

pub use console::ConsoleReporter;
pub use screen::{InlineScreen, TermScreen};

/// What the backend did with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Reported,
    Cancelled,
}

/// Reporting backend entry points (external collaborator seam).
///
/// Failures from either entry point propagate to the caller unmodified;
/// this layer adds no retry or recovery.
pub trait Reporter {
    /// Full reporting workflow: persist, transport, possible prompts.
    fn report_problem(
        &mut self,
        record: &ProblemRecord,
        flags: ReportFlags,
    ) -> Result<ReportOutcome>;

    /// Report straight from the in-memory record, used by full-screen
    /// callers that must restore their own display afterwards.
    fn report_problem_in_memory(
        &mut self,
        record: &ProblemRecord,
        flags: ReportFlags,
    ) -> Result<ReportOutcome>;
}

/// Terminal/window state save and restore around a windowed report run.
pub trait Screen {
    fn suspend(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
}

/// Active UI mode of the caller.
///
/// A closed enumeration; new modes extend it rather than probing handle
/// types at runtime.
pub enum Ui<'a> {
    /// Plain text-stream output.
    Text,
    /// Full-screen windowed (newt-style) mode.
    Window(&'a mut dyn Screen),
    /// Anything unrecognized.
    Other,
}

/// Route an assembled record to the backend entry point for the UI mode.
///
/// On the windowed path the screen is resumed whether or not the backend
/// call failed. A backend error takes precedence over a resume error; a
/// resume failure is surfaced only when the backend itself succeeded.
pub fn report(
    record: &ProblemRecord,
    ui: Ui<'_>,
    reporter: &mut dyn Reporter,
) -> Result<ReportOutcome> {
    match ui {
        Ui::Text => reporter.report_problem(record, ReportFlags::RUN_CLI),
        Ui::Window(screen) => {
            // Wait for the run to finish so the saved screen can be restored.
            let flags = ReportFlags::WAIT | ReportFlags::RUN_NEWT;
            screen.suspend()?;
            let result = reporter.report_problem_in_memory(record, flags);
            // Restore the screen even when the backend call failed.
            let resumed = screen.resume();
            let outcome = result?;
            resumed?;
            Ok(outcome)
        }
        Ui::Other => reporter.report_problem(record, ReportFlags::NONE),
    }
}
