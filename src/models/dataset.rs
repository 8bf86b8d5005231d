use std::collections::{BTreeMap, BTreeSet};

use crate::models::FlightRecord;

/// Read-only flight table the dashboard queries.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// between request handlers behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<FlightRecord>,
}

impl Dataset {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose `Year` equals `year`, in dataset order.
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &FlightRecord> + '_ {
        self.records.iter().filter(move |r| r.year == year)
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct airline codes present, ascending.
    pub fn airlines(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.reporting_airline.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn records_per_year(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.year).or_insert(0) += 1;
        }
        counts
    }
}
