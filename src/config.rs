// src/config.rs

use std::path::PathBuf;

/// Default size limit for candidate files (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Settings for one `summarize_reports` run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Files or directories to scan; directories are walked recursively.
    pub inputs: Vec<PathBuf>,
    /// Only file names ending in one of these are read.
    pub file_suffixes: Vec<String>,
    /// Larger files are skipped without being opened.
    pub max_file_size: u64,
    pub output_dir: PathBuf,
    /// Stem of the `.json` and `.tsv` data dumps.
    pub data_file_name: String,
    pub parallel: bool,
    /// Show the bar chart as percentages initially.
    pub percentages: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(".")],
            file_suffixes: vec![".txt".to_string(), ".txt.gz".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            output_dir: PathBuf::from("."),
            data_file_name: "prokka_stats".to_string(),
            parallel: true,
            percentages: false,
        }
    }
}

impl RunConfig {
    pub fn accepts_name(&self, file_name: &str) -> bool {
        self.file_suffixes.is_empty() || self.file_suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }
}
