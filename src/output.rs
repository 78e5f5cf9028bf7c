// src/output.rs

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, Serializer};

use crate::aggregator::ResultAggregator;
use crate::error::{ProkkaError, Result};
use crate::types::ORGANISM;

/// Serializes the aggregate table as `{ sample_id: record, ... }` in sample order.
pub struct DataDump<'a>(pub &'a ResultAggregator);

impl Serialize for DataDump<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

pub fn data_json(results: &ResultAggregator) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DataDump(results))?)
}

/// Tab-separated dump: `Sample`, `organism`, then every other field seen in
/// any sample, sorted by name. Fields a sample lacks are left empty.
pub fn data_tsv(results: &ResultAggregator) -> String {
    let fields: BTreeSet<&str> = results
        .iter()
        .flat_map(|(_, rec)| rec.iter().map(|(k, _)| k))
        .filter(|k| *k != ORGANISM)
        .collect();
    let columns: Vec<&str> = std::iter::once(ORGANISM).chain(fields).collect();

    let mut output = String::new();
    let _ = writeln!(output, "Sample\t{}", columns.join("\t"));
    for (sample, rec) in results.iter() {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| rec.get(c).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        let _ = writeln!(output, "{}\t{}", sample, cells.join("\t"));
    }
    output
}

/// Write `<name>.json` and `<name>.tsv` into `dir`, returning both paths.
pub fn write_data_files(results: &ResultAggregator, dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| ProkkaError::io(e, dir))?;

    let json_path = dir.join(format!("{}.json", name));
    fs::write(&json_path, data_json(results)?).map_err(|e| ProkkaError::io(e, &json_path))?;

    let tsv_path = dir.join(format!("{}.tsv", name));
    fs::write(&tsv_path, data_tsv(results)).map_err(|e| ProkkaError::io(e, &tsv_path))?;

    log::debug!("Wrote {} and {}", json_path.display(), tsv_path.display());
    Ok(vec![json_path, tsv_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleRecord;

    fn results() -> ResultAggregator {
        let mut s1 = SampleRecord::new("Escherichia coli", 5, 4641652);
        s1.insert_count("CDS", 4289);
        let mut s2 = SampleRecord::new("Bacillus subtilis", 1, 4215606);
        s2.insert_count("tRNA", 86);

        let mut agg = ResultAggregator::new();
        agg.add("S2", s2);
        agg.add("S1", s1);
        agg
    }

    #[test]
    fn tsv_has_union_of_fields() {
        let tsv = data_tsv(&results());
        let lines: Vec<_> = tsv.lines().collect();
        assert_eq!(lines[0], "Sample\torganism\tCDS\tbases\tcontigs\ttRNA");
        assert_eq!(lines[1], "S2\tBacillus subtilis\t\t4215606\t1\t86");
        assert_eq!(lines[2], "S1\tEscherichia coli\t4289\t4641652\t5\t");
    }

    #[test]
    fn json_keeps_sample_order() {
        let json = data_json(&results()).unwrap();
        let s2 = json.find("\"S2\"").unwrap();
        let s1 = json.find("\"S1\"").unwrap();
        assert!(s2 < s1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["S1"]["CDS"], 4289);
        assert_eq!(value["S2"]["organism"], "Bacillus subtilis");
    }
}
