// src/general_stats.rs

use serde::Serialize;

use crate::aggregator::{ColumnView, ResultAggregator};

/// Display metadata for one general-stats column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
}

const fn count_column(key: &'static str, title: &'static str, description: &'static str) -> ColumnSpec {
    ColumnSpec {
        key,
        title,
        description,
        min: Some(0),
        format: Some("{:i}%"),
    }
}

/// Columns shown in the general stats table, in display order.
/// `contigs` is left out on purpose; it stays available in the data dump.
pub const GENERAL_STATS_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec {
        key: "organism",
        title: "Organism",
        description: "Organism",
        min: None,
        format: None,
    },
    count_column("bases", "Bases", "Number of bases"),
    count_column("CDS", "CDS", "Number of CDS"),
    count_column("tRNA", "tRNA", "Number of tRNA"),
    count_column("rRNA", "rRNA", "Number of rRNA"),
    count_column("tmRNA", "tmRNA", "Number of tmRNA"),
    count_column("sig_peptide", "sig_peptide", "Number of sig_peptide"),
];

/// Column metadata plus the per-sample values it describes.
#[derive(Debug, Clone)]
pub struct GeneralStatsTable {
    pub columns: Vec<ColumnSpec>,
    pub view: ColumnView,
}

pub fn general_stats_table(results: &ResultAggregator) -> GeneralStatsTable {
    let keys: Vec<&str> = GENERAL_STATS_COLUMNS.iter().map(|c| c.key).collect();
    GeneralStatsTable {
        columns: GENERAL_STATS_COLUMNS.to_vec(),
        view: results.column_view(&keys),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldValue, SampleRecord};

    #[test]
    fn column_order_is_fixed() {
        let keys: Vec<_> = GENERAL_STATS_COLUMNS.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec!["organism", "bases", "CDS", "tRNA", "rRNA", "tmRNA", "sig_peptide"]
        );
    }

    #[test]
    fn only_numeric_columns_have_min_and_format() {
        for col in GENERAL_STATS_COLUMNS {
            if col.key == "organism" {
                assert_eq!(col.min, None);
                assert_eq!(col.format, None);
            } else {
                assert_eq!(col.min, Some(0));
                assert_eq!(col.format, Some("{:i}%"));
            }
        }
    }

    #[test]
    fn table_rows_follow_columns() {
        let mut rec = SampleRecord::new("Escherichia coli", 5, 4641652);
        rec.insert_count("CDS", 4289);
        let mut agg = ResultAggregator::new();
        agg.add("S1", rec);

        let table = general_stats_table(&agg);
        let row = &table.view.rows[0];
        assert_eq!(row.sample_id, "S1");
        assert_eq!(row.values[1], Some(FieldValue::Count(4641652)));
        assert_eq!(row.values[2], Some(FieldValue::Count(4289)));
        assert_eq!(row.values[3], None);
    }
}
