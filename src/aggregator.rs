// src/aggregator.rs

use ahash::AHashMap;

use crate::types::{FieldValue, SampleRecord};

/// Requested fields for every sample. `None` marks a field the sample's
/// summary never listed, which is not the same as a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub fields: Vec<String>,
    pub rows: Vec<ColumnRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub sample_id: String,
    pub values: Vec<Option<FieldValue>>,
}

/// Category counts for one sample, aligned with the requested categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySeries {
    pub sample_id: String,
    pub counts: Vec<u64>,
}

impl CategorySeries {
    /// Sum of all category counts, widened so that `u64::MAX` counts cannot overflow.
    pub fn total(&self) -> u128 {
        self.counts.iter().map(|&c| c as u128).sum()
    }
}

/// All recognized summaries keyed by sample identifier.
///
/// A second record for the same identifier replaces the first one. The
/// sample keeps the position of its first insertion.
#[derive(Debug, Default, Clone)]
pub struct ResultAggregator {
    records: AHashMap<String, SampleRecord>,
    order: Vec<String>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sample_id: impl Into<String>, record: SampleRecord) {
        let sample_id = sample_id.into();
        if self.records.insert(sample_id.clone(), record).is_some() {
            log::debug!("Replacing earlier record for sample '{}'", sample_id);
        } else {
            self.order.push(sample_id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, sample_id: &str) -> Option<&SampleRecord> {
        self.records.get(sample_id)
    }

    /// Samples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleRecord)> {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|rec| (id.as_str(), rec)))
    }

    pub fn column_view(&self, fields: &[&str]) -> ColumnView {
        let rows = self
            .iter()
            .map(|(sample_id, rec)| ColumnRow {
                sample_id: sample_id.to_string(),
                values: fields.iter().map(|f| rec.get(f).cloned()).collect(),
            })
            .collect();
        ColumnView {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            rows,
        }
    }

    /// Counts for `categories` in the given order; a missing or non-numeric
    /// category counts as zero.
    pub fn category_series(&self, categories: &[&str]) -> Vec<CategorySeries> {
        self.iter()
            .map(|(sample_id, rec)| CategorySeries {
                sample_id: sample_id.to_string(),
                counts: categories
                    .iter()
                    .map(|c| rec.count(c).unwrap_or(0))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cds: u64, trna: u64) -> SampleRecord {
        let mut rec = SampleRecord::new("Escherichia coli", 1, 1000);
        rec.insert_count("CDS", cds);
        rec.insert_count("tRNA", trna);
        rec
    }

    #[test]
    fn starts_empty() {
        let agg = ResultAggregator::new();
        assert!(agg.is_empty());
        assert_eq!(agg.iter().count(), 0);
    }

    #[test]
    fn duplicate_sample_last_write_wins() {
        let mut agg = ResultAggregator::new();
        agg.add("S1", record(10, 1));
        agg.add("S2", record(20, 2));
        agg.add("S1", record(30, 3));

        assert_eq!(agg.len(), 2);
        assert_eq!(agg.get("S1").and_then(|r| r.count("CDS")), Some(30));
        assert_eq!(agg.get("S1").and_then(|r| r.count("tRNA")), Some(3));
        let ids: Vec<_> = agg.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }

    #[test]
    fn duplicate_does_not_merge_fields() {
        let mut agg = ResultAggregator::new();
        agg.add("S1", record(10, 1));
        agg.add("S1", SampleRecord::new("Escherichia coli", 2, 500));
        assert!(agg.get("S1").is_some_and(|r| !r.contains("CDS")));
    }

    #[test]
    fn column_view_leaves_missing_fields_unset() {
        let mut agg = ResultAggregator::new();
        agg.add("S1", record(10, 1));
        let view = agg.column_view(&["organism", "CDS", "tmRNA"]);

        assert_eq!(view.fields, vec!["organism", "CDS", "tmRNA"]);
        assert_eq!(
            view.rows[0].values,
            vec![
                Some(FieldValue::Text("Escherichia coli".to_string())),
                Some(FieldValue::Count(10)),
                None,
            ]
        );
    }

    #[test]
    fn category_series_follows_requested_order() {
        let mut rec = SampleRecord::new("Escherichia coli", 1, 1000);
        rec.insert_count("sig_peptide", 6);
        rec.insert_count("tRNA", 3);
        rec.insert_count("CDS", 1);
        let mut agg = ResultAggregator::new();
        agg.add("S1", rec);

        let series = agg.category_series(&["CDS", "rRNA", "tRNA", "tmRNA", "misc_RNA", "sig_peptide"]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].counts, vec![1, 0, 3, 0, 0, 6]);
        assert_eq!(series[0].total(), 10);
    }
}
