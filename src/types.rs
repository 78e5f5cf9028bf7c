//src/types.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field names every recognized summary starts with.
pub const ORGANISM: &str = "organism";
pub const CONTIGS: &str = "contigs";
pub const BASES: &str = "bases";

/// One value in a sample record. `organism` is text, every other field is a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Count(u64),
    Text(String),
}

impl FieldValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            FieldValue::Count(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Count(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Count(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// The statistics pulled out of one Prokka summary.
///
/// Always holds `organism`, `contigs` and `bases`; every other field is
/// whatever the summary listed (`CDS`, `rRNA`, `tRNA`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl SampleRecord {
    pub fn new(organism: impl Into<String>, contigs: u64, bases: u64) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(ORGANISM.to_string(), FieldValue::Text(organism.into()));
        fields.insert(CONTIGS.to_string(), FieldValue::Count(contigs));
        fields.insert(BASES.to_string(), FieldValue::Count(bases));
        Self { fields }
    }

    /// Store a count, replacing any earlier value for the same field.
    /// `organism` always stays text; a count for it is refused and `false` returned.
    pub(crate) fn insert_count(&mut self, field: impl Into<String>, value: u64) -> bool {
        let field = field.into();
        if field == ORGANISM {
            return false;
        }
        self.fields.insert(field, FieldValue::Count(value));
        true
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn count(&self, field: &str) -> Option<u64> {
        self.get(field).and_then(FieldValue::as_count)
    }

    pub fn organism(&self) -> Option<&str> {
        self.get(ORGANISM).and_then(FieldValue::as_text)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A recognized summary: the sample identifier plus its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport {
    pub sample_id: String,
    pub record: SampleRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_required_fields() {
        let rec = SampleRecord::new("Escherichia coli", 5, 4641652);
        assert_eq!(rec.organism(), Some("Escherichia coli"));
        assert_eq!(rec.count(CONTIGS), Some(5));
        assert_eq!(rec.count(BASES), Some(4641652));
        assert_eq!(rec.len(), 3);
    }

    #[test]
    fn later_count_replaces_earlier() {
        let mut rec = SampleRecord::new("Escherichia coli", 5, 10);
        rec.insert_count("CDS", 1);
        rec.insert_count("CDS", 2);
        assert_eq!(rec.count("CDS"), Some(2));
    }

    #[test]
    fn organism_is_never_replaced_by_a_count() {
        let mut rec = SampleRecord::new("Escherichia coli", 5, 10);
        assert!(!rec.insert_count(ORGANISM, 7));
        assert_eq!(rec.organism(), Some("Escherichia coli"));
    }

    #[test]
    fn record_serializes_as_flat_object() {
        let mut rec = SampleRecord::new("Escherichia coli", 5, 10);
        rec.insert_count("tRNA", 86);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["organism"], "Escherichia coli");
        assert_eq!(json["contigs"], 5);
        assert_eq!(json["tRNA"], 86);
    }
}
