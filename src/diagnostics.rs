// src/diagnostics.rs

use std::fmt;

/// Why a trailing `<field>:<count>` line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    MissingSeparator,
    InvalidInteger,
    /// A count for `organism`, which only ever holds the organism name.
    OrganismCount,
}

/// Everything the parser has to say about one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    NotRecognized {
        source: String,
    },
    Recognized {
        source: String,
        sample: String,
        organism: String,
    },
    MalformedLine {
        source: String,
        line: String,
        reason: MalformedReason,
    },
    InvalidHeaderCount {
        source: String,
        field: &'static str,
        line: String,
    },
    Skipped {
        source: String,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NotRecognized { source } => {
                write!(f, "{} is not a prokka summary file", source)
            }
            Diagnostic::Recognized { source, sample, organism } => write!(
                f,
                "{} appears to be a prokka summary file: sample '{}', organism '{}'",
                source, sample, organism
            ),
            Diagnostic::MalformedLine { source, line, reason } => match reason {
                MalformedReason::MissingSeparator => {
                    write!(f, "{}: no ':' separator in line '{}'", source, line)
                }
                MalformedReason::InvalidInteger => {
                    write!(f, "{}: unable to parse line '{}'", source, line)
                }
                MalformedReason::OrganismCount => {
                    write!(f, "{}: ignoring count for organism in line '{}'", source, line)
                }
            },
            Diagnostic::InvalidHeaderCount { source, field, line } => write!(
                f,
                "{}: {} line is not a count, skipping file: '{}'",
                source, field, line
            ),
            Diagnostic::Skipped { source, reason } => write!(f, "skipping {}: {}", source, reason),
        }
    }
}

/// Where diagnostics go. Passed in by whoever drives the parser.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}", diagnostic);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}
