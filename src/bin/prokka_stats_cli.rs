use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use prokka_stats::config::{RunConfig, DEFAULT_MAX_FILE_SIZE};
use prokka_stats::diagnostics::LogSink;
use prokka_stats::error::ProkkaError;
use prokka_stats::output::write_data_files;
use prokka_stats::summarize_reports;

/// Summarise Prokka annotation summary files across samples.
#[derive(Debug, Parser)]
#[command(name = "prokka-stats", version)]
struct Cli {
    /// Files or directories to search for Prokka summaries
    #[arg(default_value = ".")]
    inputs: Vec<PathBuf>,

    /// Directory for the data dump
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    /// Stem of the .json/.tsv data files
    #[arg(short = 'n', long, default_value = "prokka_stats")]
    data_file_name: String,

    /// Candidate file name suffix (repeatable)
    #[arg(short, long = "suffix", default_values = [".txt", ".txt.gz"])]
    suffixes: Vec<String>,

    /// Skip files larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Parse files one at a time
    #[arg(long)]
    no_parallel: bool,

    /// Show the bar chart as percentages
    #[arg(long)]
    percentages: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            inputs: cli.inputs,
            file_suffixes: cli.suffixes,
            max_file_size: cli.max_file_size,
            output_dir: cli.outdir,
            data_file_name: cli.data_file_name,
            parallel: !cli.no_parallel,
            percentages: cli.percentages,
        }
    }
}

fn spinner(color: &str, msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{}}} {{msg}}", color))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg);
    spinner
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = RunConfig::from(Cli::parse());

    // 1. Scan and parse
    let spinner_parse = spinner("blue", "Searching for Prokka summaries...");
    let summary = match summarize_reports(&config, &mut LogSink) {
        Ok(summary) => summary,
        Err(ProkkaError::NoUsableInput) => {
            spinner_parse.finish_and_clear();
            log::info!("No Prokka summaries found, nothing to write");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            spinner_parse.finish_and_clear();
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    spinner_parse.finish_with_message(format!("Found {} sample(s).", summary.results.len()));

    // 2. Write the data dump
    let spinner_write = spinner("yellow", "Writing data files...");
    if let Err(e) = write_data_files(&summary.results, &config.output_dir, &config.data_file_name) {
        spinner_write.finish_and_clear();
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }
    spinner_write.finish_with_message("Data files written.");

    // 3. Print the general stats table
    let headers: Vec<&str> = summary.general_stats.columns.iter().map(|c| c.title).collect();
    println!("Sample\t{}", headers.join("\t"));
    for row in &summary.general_stats.view.rows {
        let cells: Vec<String> = row
            .values
            .iter()
            .map(|v| v.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()))
            .collect();
        println!("{}\t{}", row.sample_id, cells.join("\t"));
    }

    ExitCode::SUCCESS
}
