// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console reporting backend
//!
//! Prints the record instead of shipping it anywhere; the default backend
//! for the CLI and a reference implementation of the [`Reporter`] seam.

use crate::dispatch::{ReportOutcome, Reporter};
use crate::types::{ProblemRecord, ReportFlags};
use anyhow::Result;
use colored::*;

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn print(&self, record: &ProblemRecord, flags: ReportFlags) {
        println!("\n{}", "=== MAYDAY PROBLEM REPORT ===".bold().cyan());
        if !flags.is_empty() {
            println!("{}", format!("flags: {}", flags).dimmed());
        }
        println!();

        for (key, value) in record.iter() {
            if value.contains('\n') {
                println!("  {}:", key.bold());
                for line in value.lines() {
                    println!("    {}", line);
                }
            } else {
                println!("  {}: {}", key.bold(), value);
            }
        }
        println!();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report_problem(
        &mut self,
        record: &ProblemRecord,
        flags: ReportFlags,
    ) -> Result<ReportOutcome> {
        self.print(record, flags);
        Ok(ReportOutcome::Reported)
    }

    fn report_problem_in_memory(
        &mut self,
        record: &ProblemRecord,
        flags: ReportFlags,
    ) -> Result<ReportOutcome> {
        self.print(record, flags);
        Ok(ReportOutcome::Reported)
    }
}
