//! The in-memory table every chart is derived from.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::record::Record;

/// Records sorted ascending by date. The order is fixed at construction and the
/// collection is never mutated afterwards, so a single instance can be shared
/// across request handlers behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Sorts by date. `sort_by_key` is stable, so rows sharing a date keep
    /// their input order.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest dates, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date, last.date))
    }

    /// Distinct region names, sorted.
    pub fn regions(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.region.as_str()))
    }

    /// Distinct avocado types, sorted.
    pub fn types(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.avocado_type.as_str()))
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
