//! Diagnostic reporting
//!
//! Skipped records and run summaries are not errors: they go to a
//! [`DiagnosticSink`] and the pipeline keeps going. The default sink forwards
//! everything to the `log` facade.

use std::cell::RefCell;
use std::fmt;

use crate::execution::evaluation::EvaluationTiming;

/// Something worth telling the operator about while ingesting or evaluating.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A line had fewer than four fields and was skipped.
    MalformedRecord {
        /// 1-based line number in the input
        line: usize,
        /// Number of fields found
        fields: usize,
    },
    /// An event had a non-numeric timestamp and was not committed.
    InvalidTimestamp {
        /// Number of events committed before this one
        committed: usize,
        timestamp: String,
    },
    /// A line was not valid UTF-8. It was decoded with replacement
    /// characters and parsed as usual.
    InvalidUtf8 {
        line: usize,
    },
    /// A committed event had a rating that is not a decimal. The event is
    /// kept without a rating.
    UnparsableRating {
        line: usize,
        value: String,
    },
    /// Ingestion progress.
    Progress {
        committed: usize,
    },
    /// Summary of an evaluation run.
    Timing(EvaluationTiming),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRecord { line, fields } => {
                write!(f, "Line too short ({} fields) at line {}", fields, line)
            }
            Diagnostic::InvalidTimestamp { committed, timestamp } => {
                write!(f, "Invalid timestamp '{}' after {} events", timestamp, committed)
            }
            Diagnostic::InvalidUtf8 { line } => {
                write!(f, "Invalid UTF-8 at line {}, decoded lossily", line)
            }
            Diagnostic::UnparsableRating { line, value } => {
                write!(f, "Ignoring unparsable rating '{}' at line {}", value, line)
            }
            Diagnostic::Progress { committed } => write!(f, "Read in {} events", committed),
            Diagnostic::Timing(timing) => write!(f, "{}", timing),
        }
    }
}

/// Receiver of diagnostics. Reporting must never fail the caller.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MalformedRecord { .. }
            | Diagnostic::InvalidTimestamp { .. }
            | Diagnostic::InvalidUtf8 { .. } => {
                log::warn!("{}", diagnostic);
            }
            Diagnostic::UnparsableRating { .. } => log::debug!("{}", diagnostic),
            Diagnostic::Progress { .. } | Diagnostic::Timing(_) => log::info!("{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn malformed_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedRecord { .. }))
            .count()
    }

    pub fn invalid_timestamp_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| matches!(d, Diagnostic::InvalidTimestamp { .. }))
            .count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
