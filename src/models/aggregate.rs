use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::models::DelayCause;

/// Mean delay for one (month, airline) group.
///
/// `mean` is `None` when every record in the group had the cause missing.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub month: u32,
    pub reporting_airline: String,
    pub mean: Option<f64>,
}

impl AggregateRow {
    pub fn new(month: u32, reporting_airline: String, mean: Option<f64>) -> Self {
        Self {
            month,
            reporting_airline,
            mean,
        }
    }

    pub fn key(&self) -> (u32, &str) {
        (self.month, self.reporting_airline.as_str())
    }
}

/// Grouped averages of a single delay cause.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable {
    pub cause: DelayCause,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn new(cause: DelayCause, rows: Vec<AggregateRow>) -> Self {
        Self { cause, rows }
    }

    pub fn empty(cause: DelayCause) -> Self {
        Self::new(cause, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, month: u32, airline: &str) -> Option<&AggregateRow> {
        self.rows.iter().find(|row| row.key() == (month, airline))
    }

    /// Column names as they appear in serialized rows.
    pub fn columns(&self) -> [&'static str; 3] {
        ["Month", "Reporting_Airline", self.cause.column()]
    }
}

struct RowView<'a> {
    value_column: &'static str,
    row: &'a AggregateRow,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("Month", &self.row.month)?;
        map.serialize_entry("Reporting_Airline", &self.row.reporting_airline)?;
        map.serialize_entry(self.value_column, &self.row.mean)?;
        map.end()
    }
}

impl Serialize for AggregateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<RowView<'_>> = self
            .rows
            .iter()
            .map(|row| RowView {
                value_column: self.cause.column(),
                row,
            })
            .collect();

        let mut table = serializer.serialize_struct("AggregateTable", 3)?;
        table.serialize_field("cause", self.cause.column())?;
        table.serialize_field("columns", &self.columns())?;
        table.serialize_field("rows", &rows)?;
        table.end()
    }
}

/// The five per-cause tables for one year, in `DelayCause::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayAggregates {
    pub year: i32,
    pub tables: Vec<AggregateTable>,
}

impl DelayAggregates {
    pub fn new(year: i32, tables: Vec<AggregateTable>) -> Self {
        Self { year, tables }
    }

    pub fn get(&self, cause: DelayCause) -> Option<&AggregateTable> {
        self.tables.iter().find(|t| t.cause == cause)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregateTable> {
        self.tables.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(AggregateTable::is_empty)
    }
}
