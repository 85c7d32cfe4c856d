use crate::state::ProviderRecord;
use std::collections::HashSet;

/// Accumulated providers of a run
///
/// Records are kept in first-seen order; a record whose lower-cased name was
/// already accepted is discarded.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<ProviderRecord>,
    seen: HashSet<String>,
    duplicates: usize,
}

impl ResultSet {
    /// Creates an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `record` unless its name was seen before
    ///
    /// Returns `true` when the record was appended.
    pub fn insert(&mut self, record: ProviderRecord) -> bool {
        if !self.seen.insert(record.dedup_key()) {
            self.duplicates += 1;
            return false;
        }
        self.records.push(record);
        true
    }

    /// True when a provider with this name (any casing) was accepted
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(&name.to_lowercase())
    }

    pub fn records(&self) -> &[ProviderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records discarded as duplicates
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Hands the accepted records over for export
    pub fn into_records(self) -> Vec<ProviderRecord> {
        self.records
    }
}
