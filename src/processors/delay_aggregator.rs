use crate::error::{DashboardError, Result};
use crate::models::{AggregateRow, AggregateTable, Dataset, DelayAggregates, DelayCause, FlightRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Parse the year typed into the dashboard.
///
/// Surrounding whitespace is ignored; anything that is not an `i32` is an
/// error and is never coerced to a default.
pub fn parse_year(input: &str) -> Result<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|source| DashboardError::InvalidYear {
            input: input.to_string(),
            source,
        })
}

#[derive(Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Averages each delay cause per (month, airline) for a single year.
pub struct DelayAggregator;

impl DelayAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate for a year given as text, as it arrives from the page.
    pub fn aggregate(&self, dataset: &Dataset, year_input: &str) -> Result<DelayAggregates> {
        let year = parse_year(year_input)?;
        Ok(self.aggregate_year(dataset, year))
    }

    /// Five independent tables, one per cause. A year with no records gives
    /// five empty tables.
    pub fn aggregate_year(&self, dataset: &Dataset, year: i32) -> DelayAggregates {
        let selected: Vec<&FlightRecord> = dataset.for_year(year).collect();

        let tables = DelayCause::ALL
            .into_iter()
            .map(|cause| self.average_by_month_and_airline(&selected, cause))
            .collect();

        debug!(
            "Aggregated {} of {} records for year {}",
            selected.len(),
            dataset.len(),
            year
        );

        DelayAggregates::new(year, tables)
    }

    /// Group by (Month, Reporting_Airline) and take the mean of the cause's
    /// non-missing values. Groups come out sorted by key.
    pub fn average_by_month_and_airline(
        &self,
        records: &[&FlightRecord],
        cause: DelayCause,
    ) -> AggregateTable {
        let mut groups: BTreeMap<(u32, &str), MeanAccumulator> = BTreeMap::new();

        for record in records {
            groups
                .entry((record.month, record.reporting_airline.as_str()))
                .or_default()
                .push(record.delay(cause));
        }

        let rows = groups
            .into_iter()
            .map(|((month, airline), acc)| AggregateRow::new(month, airline.to_string(), acc.mean()))
            .collect();

        AggregateTable::new(cause, rows)
    }
}

impl Default for DelayAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlightRecordBuilder;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn flight(year: i32, month: u32, airline: &str, delays: [Option<f64>; 5]) -> FlightRecord {
        FlightRecordBuilder::new()
            .year(year)
            .month(month)
            .airline(airline)
            .delays(delays)
            .build()
            .unwrap()
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            flight(2010, 3, "AA", [Some(10.0), Some(0.0), Some(4.0), None, Some(1.0)]),
            flight(2010, 3, "AA", [Some(20.0), Some(6.0), None, None, Some(3.0)]),
            flight(2010, 4, "DL", [Some(5.0), None, Some(2.0), Some(0.0), None]),
            flight(2009, 3, "AA", [Some(1000.0), Some(1000.0), Some(1000.0), Some(1000.0), Some(1000.0)]),
            flight(2009, 7, "UA", [Some(8.0), None, None, None, None]),
        ])
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2010").unwrap(), 2010);
        assert_eq!(parse_year(" 2015 ").unwrap(), 2015);
        assert!(matches!(parse_year("twenty"), Err(DashboardError::InvalidYear { .. })));
        assert!(parse_year("").is_err());
        assert!(parse_year("2010.5").is_err());
        assert!(parse_year("99999999999").is_err());
    }

    #[test]
    fn test_mean_of_matching_group() {
        let aggregates = DelayAggregator::new().aggregate(&sample_dataset(), "2010").unwrap();
        let carrier = aggregates.get(DelayCause::Carrier).unwrap();

        assert_eq!(carrier.get(3, "AA").unwrap().mean, Some(15.0));
        assert_eq!(carrier.get(4, "DL").unwrap().mean, Some(5.0));
        assert_eq!(carrier.len(), 2);
    }

    #[test]
    fn test_missing_values_are_ignored() {
        let aggregates = DelayAggregator::new().aggregate_year(&sample_dataset(), 2010);

        let nas = aggregates.get(DelayCause::Nas).unwrap();
        assert_eq!(nas.get(3, "AA").unwrap().mean, Some(4.0));

        // every record in the group is missing the value
        let security = aggregates.get(DelayCause::Security).unwrap();
        assert_eq!(security.get(3, "AA").unwrap().mean, None);
        assert_eq!(security.get(4, "DL").unwrap().mean, Some(0.0));
    }

    #[test]
    fn test_only_requested_year_contributes() {
        let data = sample_dataset();
        let aggregates = DelayAggregator::new().aggregate_year(&data, 2010);

        let source_keys: HashSet<(u32, &str)> = data
            .for_year(2010)
            .map(|r| (r.month, r.reporting_airline.as_str()))
            .collect();

        for table in aggregates.iter() {
            assert!(table.len() <= source_keys.len());
            for row in &table.rows {
                assert!(source_keys.contains(&row.key()));
            }
        }

        let late = aggregates.get(DelayCause::LateAircraft).unwrap();
        assert_eq!(late.get(3, "AA").unwrap().mean, Some(2.0));
        assert!(late.get(7, "UA").is_none());
    }

    #[test]
    fn test_year_without_records_gives_five_empty_tables() {
        let aggregates = DelayAggregator::new().aggregate(&sample_dataset(), "2099").unwrap();

        assert_eq!(aggregates.tables.len(), 5);
        assert!(aggregates.is_empty());
        let causes: Vec<_> = aggregates.iter().map(|t| t.cause).collect();
        assert_eq!(causes, DelayCause::ALL.to_vec());
    }

    #[test]
    fn test_invalid_year_propagates() {
        let result = DelayAggregator::new().aggregate(&sample_dataset(), "abc");
        assert!(matches!(result, Err(DashboardError::InvalidYear { ref input, .. }) if input == "abc"));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let data = sample_dataset();
        let aggregator = DelayAggregator::new();

        let first = aggregator.aggregate_year(&data, 2010);
        let second = aggregator.aggregate_year(&data, 2010);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.rows.len(), b.rows.len());
            for (ra, rb) in a.rows.iter().zip(&b.rows) {
                assert_eq!(ra.key(), rb.key());
                assert_eq!(ra.mean.map(f64::to_bits), rb.mean.map(f64::to_bits));
            }
        }
    }

    #[test]
    fn test_rows_sorted_by_month_then_airline() {
        let data = Dataset::new(vec![
            flight(2012, 9, "WN", [Some(1.0), None, None, None, None]),
            flight(2012, 2, "UA", [Some(1.0), None, None, None, None]),
            flight(2012, 2, "AA", [Some(1.0), None, None, None, None]),
        ]);

        let table = DelayAggregator::new()
            .aggregate_year(&data, 2012)
            .get(DelayCause::Carrier)
            .cloned()
            .unwrap();
        let keys: Vec<(u32, &str)> = table.rows.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec![(2, "AA"), (2, "UA"), (9, "WN")]);
    }
}
