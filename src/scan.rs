// src/scan.rs

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use walkdir::WalkDir;

use crate::config::RunConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{ProkkaError, Result};

/// Collect candidate files under `config.inputs`, sorted by path.
///
/// The sorted order is the scan order: when two summaries share a sample
/// identifier, the later path wins.
pub fn find_candidates(config: &RunConfig, sink: &mut dyn DiagnosticSink) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for input in &config.inputs {
        for entry in WalkDir::new(input).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| input.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                ProkkaError::io(source, path)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !config.accepts_name(&name) {
                continue;
            }
            let size = entry
                .metadata()
                .map_err(|e| ProkkaError::Io {
                    source: e.into(),
                    path: entry.path().to_path_buf(),
                })?
                .len();
            if size > config.max_file_size {
                sink.emit(Diagnostic::Skipped {
                    source: entry.path().display().to_string(),
                    reason: format!("file is {} bytes, limit is {}", size, config.max_file_size),
                });
                continue;
            }
            candidates.push(entry.into_path());
        }
    }

    candidates.sort();
    candidates.dedup();
    Ok(candidates)
}

/// Read a whole candidate file, decompressing it when the name ends in `.gz`.
/// Invalid UTF-8 is replaced rather than treated as an error.
pub fn read_report_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let mut reader: Box<dyn Read> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
