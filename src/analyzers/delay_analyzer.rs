use crate::models::{Dataset, DelayCause};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub year_range: Option<(i32, i32)>,
    pub records_per_year: BTreeMap<i32, usize>,
    pub airlines: Vec<String>,
    pub diverted_records: usize,
    pub cause_stats: Vec<CauseStats>,
}

#[derive(Debug)]
pub struct CauseStats {
    pub cause: DelayCause,
    pub reported: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

impl CauseStats {
    pub fn reported_percentage(&self) -> f64 {
        let total = self.reported + self.missing;
        if total == 0 {
            return 0.0;
        }
        (self.reported as f64 / total as f64) * 100.0
    }
}

pub struct DelayAnalyzer;

impl DelayAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, dataset: &Dataset) -> DatasetStatistics {
        let records_per_year = dataset.records_per_year();
        let year_range = match (
            records_per_year.keys().next(),
            records_per_year.keys().next_back(),
        ) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };

        let cause_stats = DelayCause::ALL
            .into_iter()
            .map(|cause| self.cause_statistics(dataset, cause))
            .collect();

        DatasetStatistics {
            total_records: dataset.len(),
            year_range,
            records_per_year,
            airlines: dataset.airlines().into_iter().map(String::from).collect(),
            diverted_records: dataset.records().iter().filter(|r| r.is_diverted()).count(),
            cause_stats,
        }
    }

    fn cause_statistics(&self, dataset: &Dataset, cause: DelayCause) -> CauseStats {
        let mut reported = 0;
        let mut missing = 0;
        let mut sum = 0.0f64;
        let mut max: Option<f64> = None;

        for record in dataset.records() {
            match record.delay(cause).filter(|v| !v.is_nan()) {
                Some(value) => {
                    reported += 1;
                    sum += value;
                    max = Some(max.map_or(value, |m| m.max(value)));
                }
                None => missing += 1,
            }
        }

        CauseStats {
            cause,
            reported,
            missing,
            mean: (reported > 0).then(|| sum / reported as f64),
            max,
        }
    }
}

impl Default for DelayAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        let years = match self.year_range {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "No records".to_string(),
        };

        format!(
            "Records: {} sampled\n\
            Years: {} ({} distinct)\n\
            Airlines: {} ({})\n\
            Diverted flights: {}",
            self.total_records,
            years,
            self.records_per_year.len(),
            self.airlines.len(),
            self.airlines.join(", "),
            self.diverted_records
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut out = self.summary();

        out.push_str("\n\nRecords per year:");
        for (year, count) in &self.records_per_year {
            out.push_str(&format!("\n- {}: {}", year, count));
        }

        out.push_str("\n\nDelay causes (minutes):");
        for stats in &self.cause_stats {
            let mean = stats
                .mean
                .map(|m| format!("{:.1}", m))
                .unwrap_or_else(|| "n/a".to_string());
            let max = stats
                .max
                .map(|m| format!("{:.1}", m))
                .unwrap_or_else(|| "n/a".to_string());
            out.push_str(&format!(
                "\n- {}: mean {}, max {}, reported {:.1}%",
                stats.cause.column(),
                mean,
                max,
                stats.reported_percentage()
            ));
        }

        out
    }
}
