// src/lib.rs
pub mod types;
pub mod error;
pub mod diagnostics;
pub mod report_parser;
pub mod aggregator;
pub mod general_stats;
pub mod barplot;
pub mod config;
pub mod scan;
pub mod output;

use rayon::prelude::*;

use crate::aggregator::ResultAggregator;
use crate::barplot::{build_barplot, BarPlot, BarPlotConfig};
use crate::config::RunConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{ProkkaError, Result};
use crate::general_stats::{general_stats_table, GeneralStatsTable};
use crate::report_parser::parse_report_text;
use crate::scan::{find_candidates, read_report_text};
use crate::types::ParsedReport;

/// One candidate file: a label for diagnostics plus its text.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub label: String,
    pub text: String,
}

/// Everything the presentation layer needs from one run.
#[derive(Debug)]
pub struct ProkkaSummary {
    /// Merged table, sample id -> record
    pub results: ResultAggregator,
    pub general_stats: GeneralStatsTable,
    pub barplot: BarPlot,
}

impl ProkkaSummary {
    pub fn from_results(results: ResultAggregator, barplot_config: BarPlotConfig) -> Self {
        let general_stats = general_stats_table(&results);
        let barplot = build_barplot(&results, barplot_config);
        Self {
            results,
            general_stats,
            barplot,
        }
    }
}

fn parse_candidate(candidate: &Candidate) -> (Vec<Diagnostic>, Option<ParsedReport>) {
    let mut diags: Vec<Diagnostic> = Vec::new();
    // A bad header count has already been reported to `diags`.
    let parsed = parse_report_text(&candidate.text, &candidate.label, &mut diags)
        .ok()
        .flatten();
    (diags, parsed)
}

/// Parse every candidate and merge the recognized ones.
///
/// With `parallel` the files are parsed on the rayon pool, but results and
/// diagnostics are still applied in candidate order, so a duplicate sample
/// identifier always resolves to the last candidate holding it.
pub fn collect_reports(
    candidates: &[Candidate],
    parallel: bool,
    sink: &mut dyn DiagnosticSink,
) -> Result<ResultAggregator> {
    let parsed: Vec<_> = if parallel {
        candidates.par_iter().map(parse_candidate).collect()
    } else {
        candidates.iter().map(parse_candidate).collect()
    };

    let mut results = ResultAggregator::new();
    for (diags, report) in parsed {
        for d in diags {
            sink.emit(d);
        }
        if let Some(ParsedReport { sample_id, record }) = report {
            results.add(sample_id, record);
        }
    }

    if results.is_empty() {
        return Err(ProkkaError::NoUsableInput);
    }
    log::info!("Found {} reports", results.len());
    Ok(results)
}

/// Scan `config.inputs`, parse everything that looks like a Prokka summary
/// and build the table and chart payloads.
///
/// Returns `ProkkaError::NoUsableInput` when nothing was recognized so the
/// caller can leave the section out.
pub fn summarize_reports(config: &RunConfig, sink: &mut dyn DiagnosticSink) -> Result<ProkkaSummary> {
    let paths = find_candidates(config, sink)?;
    log::debug!("Scanning {} candidate file(s)", paths.len());

    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        let label = path.display().to_string();
        match read_report_text(&path) {
            Ok(text) => candidates.push(Candidate { label, text }),
            Err(e) => {
                log::warn!("Could not read {}: {}", label, e);
                sink.emit(Diagnostic::Skipped {
                    source: label,
                    reason: e.to_string(),
                });
            }
        }
    }

    let results = collect_reports(&candidates, config.parallel, sink)?;
    let barplot_config = BarPlotConfig {
        percentages: config.percentages,
        ..BarPlotConfig::default()
    };
    Ok(ProkkaSummary::from_results(results, barplot_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(label: &str, text: &str) -> Candidate {
        Candidate {
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn no_recognized_reports_is_no_usable_input() {
        let candidates = vec![
            candidate("a.txt", "hello\nworld\n"),
            candidate("b.txt", ""),
        ];
        let mut diags: Vec<Diagnostic> = Vec::new();
        let err = collect_reports(&candidates, false, &mut diags).unwrap_err();
        assert!(matches!(err, ProkkaError::NoUsableInput));
        assert_eq!(diags.len(), 2);

        let err = collect_reports(&[], true, &mut diags).unwrap_err();
        assert!(matches!(err, ProkkaError::NoUsableInput));
    }

    #[test]
    fn one_recognized_report_is_enough() {
        let candidates = vec![
            candidate("a.txt", "hello\n"),
            candidate("b.txt", "organism: Escherichia coli S1\ncontigs: 1\nbases: 2\n"),
        ];
        let results = collect_reports(&candidates, false, &mut Vec::<Diagnostic>::new()).unwrap();
        assert!(!results.is_empty());
        assert!(results.get("S1").is_some());
    }

    #[test]
    fn parallel_keeps_scan_order_for_duplicates() {
        let candidates: Vec<_> = (0..64)
            .map(|i| {
                candidate(
                    &format!("{}.txt", i),
                    &format!("organism: Escherichia coli DUP\ncontigs: {}\nbases: 2\n", i),
                )
            })
            .collect();

        let mut diags: Vec<Diagnostic> = Vec::new();
        let results = collect_reports(&candidates, true, &mut diags).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.get("DUP").and_then(|r| r.count("contigs")), Some(63));

        let sources: Vec<_> = diags
            .iter()
            .map(|d| match d {
                Diagnostic::Recognized { source, .. } => source.clone(),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        let expected: Vec<_> = (0..64).map(|i| format!("{}.txt", i)).collect();
        assert_eq!(sources, expected);
    }

    #[test]
    fn bad_header_count_skips_only_that_file() {
        let candidates = vec![
            candidate("bad.txt", "organism: Escherichia coli S1\ncontigs: x\nbases: 2\n"),
            candidate("good.txt", "organism: Escherichia coli S2\ncontigs: 1\nbases: 2\n"),
        ];
        let mut diags: Vec<Diagnostic> = Vec::new();
        let results = collect_reports(&candidates, false, &mut diags).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.get("S2").is_some());
        assert!(matches!(diags[0], Diagnostic::InvalidHeaderCount { .. }));
    }
}
