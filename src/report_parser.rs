// src/report_parser.rs

use crate::diagnostics::{Diagnostic, DiagnosticSink, MalformedReason};
use crate::error::ReportError;
use crate::types::{ParsedReport, SampleRecord, BASES, CONTIGS};

/// Outcome of reading one trailing `<field>:<count>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLine<'a> {
    Count(&'a str, u64),
    Malformed(MalformedReason),
}

/// Split a trailing line on its first ':' and read the count after it.
pub fn parse_field_line(line: &str) -> FieldLine<'_> {
    match line.split_once(':') {
        None => FieldLine::Malformed(MalformedReason::MissingSeparator),
        Some((description, value)) => match value.trim().parse::<u64>() {
            Ok(n) => FieldLine::Count(description, n),
            Err(_) => FieldLine::Malformed(MalformedReason::InvalidInteger),
        },
    }
}

/// First two words after `organism:`.
fn organism_name(first_line: &str) -> String {
    let rest = first_line
        .trim()
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or("");
    rest.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Every whitespace token of the first line from the fourth onward.
///
/// Assumes a two-word organism name; one-word or longer names shift the
/// identifier accordingly.
fn sample_name(first_line: &str) -> String {
    first_line
        .split_whitespace()
        .skip(3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count between the first and second ':' of a header line.
fn header_count(line: &str, field: &'static str) -> Result<u64, ReportError> {
    line.split(':')
        .nth(1)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or_else(|| ReportError::InvalidHeaderCount {
            field,
            line: line.to_string(),
        })
}

/// Try to read a Prokka summary.
///
/// Prokka summaries have no reliable file name or marker, so the only test
/// is the first three lines: they must start with `organism:`, `contigs:`
/// and `bases:`. Anything else is `Ok(None)`; that is the normal outcome
/// for unrelated files. Trailing lines that do not hold a count are
/// reported to `sink` and dropped.
pub fn attempt_parse<L: AsRef<str>>(
    lines: &[L],
    source: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<Option<ParsedReport>, ReportError> {
    let mut head = lines.iter().map(|l| l.as_ref());
    let first_line = head.next().unwrap_or("");
    let contigs_line = head.next().unwrap_or("");
    let bases_line = head.next().unwrap_or("");

    let recognized = first_line.starts_with("organism:")
        && contigs_line.starts_with("contigs:")
        && bases_line.starts_with("bases:");
    if !recognized {
        sink.emit(Diagnostic::NotRecognized {
            source: source.to_string(),
        });
        return Ok(None);
    }

    let organism = organism_name(first_line);
    let sample_id = sample_name(first_line);

    let counts = header_count(contigs_line, CONTIGS)
        .and_then(|contigs| Ok((contigs, header_count(bases_line, BASES)?)));
    let (contigs, bases) = match counts {
        Ok(c) => c,
        Err(err) => {
            let ReportError::InvalidHeaderCount { field, line } = &err;
            sink.emit(Diagnostic::InvalidHeaderCount {
                source: source.to_string(),
                field: *field,
                line: line.clone(),
            });
            return Err(err);
        }
    };

    sink.emit(Diagnostic::Recognized {
        source: source.to_string(),
        sample: sample_id.clone(),
        organism: organism.clone(),
    });

    let mut record = SampleRecord::new(organism, contigs, bases);
    for line in lines.iter().skip(3).map(|l| l.as_ref()) {
        let reason = match parse_field_line(line) {
            FieldLine::Count(description, n) => {
                if record.insert_count(description, n) {
                    continue;
                }
                MalformedReason::OrganismCount
            }
            FieldLine::Malformed(reason) => reason,
        };
        sink.emit(Diagnostic::MalformedLine {
            source: source.to_string(),
            line: line.to_string(),
            reason,
        });
    }

    Ok(Some(ParsedReport { sample_id, record }))
}

/// `attempt_parse` over a whole file's text.
pub fn parse_report_text(
    text: &str,
    source: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<Option<ParsedReport>, ReportError> {
    let lines: Vec<&str> = text.lines().collect();
    attempt_parse(&lines, source, sink)
}
