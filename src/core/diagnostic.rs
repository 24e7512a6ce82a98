use serde::Serialize;
use thiserror::Error;

use crate::util::output;

/// Why a record or a reporting line was left out of the hierarchy, or why an
/// aggregate query fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("line {line}: employee id is empty, record skipped")]
    EmptyId { line: usize },
    #[error("line {line}: record for {id} has {found} field(s), expected id, manager and salary")]
    MissingFields { line: usize, id: String, found: usize },
    #[error("line {line}: {id} has no manager but {root} is already the root, record skipped")]
    MultipleRoots { line: usize, id: String, root: String },
    #[error("line {line}: salary {value:?} of {id} is not a valid integer, record skipped")]
    InvalidSalary {
        line: usize,
        id: String,
        value: String,
    },
    #[error("line {line}: employee {id} is listed more than once, record skipped")]
    DuplicateId { line: usize, id: String },
    #[error("line {line}: employee {id} already reports to {current}, {manager} rejected as second manager")]
    AlreadyManaged {
        line: usize,
        id: String,
        manager: String,
        current: String,
    },
    #[error("line {line}: employee {id} reporting to {manager} would create a circular reference")]
    CycleDetected {
        line: usize,
        id: String,
        manager: String,
    },
    #[error("line {line}: manager {manager} of employee {id} is not a known employee")]
    UnknownManager {
        line: usize,
        id: String,
        manager: String,
    },
    #[error("salary budget for {manager} unavailable: {reason}")]
    BudgetUnavailable { manager: String, reason: String },
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Writes each diagnostic to stderr as a warning.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    quiet: bool,
    reported: usize,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, reported: 0 }
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        if !self.quiet {
            output::warn(&diagnostic.to_string());
        }
    }
}
