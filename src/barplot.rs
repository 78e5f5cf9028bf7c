// src/barplot.rs

use serde::Serialize;

use crate::aggregator::ResultAggregator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarCategory {
    pub key: &'static str,
    pub name: &'static str,
}

/// Stacked bar categories, bottom to top. `contigs` and `bases` are not
/// feature counts and stay out of the chart.
pub const BAR_CATEGORIES: [BarCategory; 6] = [
    BarCategory { key: "CDS", name: "CDS" },
    BarCategory { key: "rRNA", name: "rRNA" },
    BarCategory { key: "tRNA", name: "tRNA" },
    BarCategory { key: "tmRNA", name: "tmRNA" },
    BarCategory { key: "misc_RNA", name: "misc RNA" },
    BarCategory { key: "sig_peptide", name: "Signaling peptides" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarPlotConfig {
    pub id: String,
    pub title: String,
    pub ylab: String,
    pub cpswitch_counts_label: String,
    /// Start in percentage view instead of absolute counts.
    pub percentages: bool,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            id: "prokka_plot".to_string(),
            title: "Prokka".to_string(),
            ylab: "# Counts".to_string(),
            cpswitch_counts_label: "Features".to_string(),
            percentages: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSample {
    pub sample: String,
    pub counts: Vec<u64>,
    /// Share of the sample's category total, 0..=100.
    pub percentages: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPlot {
    pub config: BarPlotConfig,
    pub categories: Vec<BarCategory>,
    pub samples: Vec<BarSample>,
}

impl BarPlot {
    /// Values for the view selected by `config.percentages`.
    pub fn active_values(&self) -> Vec<(&str, Vec<f64>)> {
        self.samples
            .iter()
            .map(|s| {
                let values = if self.config.percentages {
                    s.percentages.clone()
                } else {
                    s.counts.iter().map(|&c| c as f64).collect()
                };
                (s.sample.as_str(), values)
            })
            .collect()
    }
}

pub fn build_barplot(results: &ResultAggregator, config: BarPlotConfig) -> BarPlot {
    let keys: Vec<&str> = BAR_CATEGORIES.iter().map(|c| c.key).collect();

    let samples = results
        .category_series(&keys)
        .into_iter()
        .map(|series| {
            let total = series.total();
            let percentages = series
                .counts
                .iter()
                .map(|&c| if total == 0 { 0.0 } else { 100.0 * c as f64 / total as f64 })
                .collect();
            BarSample {
                sample: series.sample_id,
                counts: series.counts,
                percentages,
            }
        })
        .collect();

    BarPlot {
        config,
        categories: BAR_CATEGORIES.to_vec(),
        samples,
    }
}
