use crate::error::{DashboardError, Result};
use crate::models::{Dataset, FlightRecord};
use crate::readers::{DataSource, FlightReader};
use crate::utils::constants::{DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use crate::utils::progress::ProgressReporter;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;

/// Loads the dashboard dataset: fetch, decode, parse, then take a seeded
/// sample without replacement.
pub struct DatasetLoader {
    source: DataSource,
    sample_size: usize,
    seed: u64,
    reader: FlightReader,
}

impl DatasetLoader {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            reader: FlightReader::new(),
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub async fn load(&self, progress: Option<&ProgressReporter>) -> Result<Dataset> {
        let started = Instant::now();

        if let Some(p) = progress {
            p.set_message(&format!("Fetching {}", self.source));
        }
        let bytes = self.source.fetch().await?;

        if let Some(p) = progress {
            p.set_message("Parsing flight records...");
        }
        let records = self.reader.read_bytes(&bytes)?;
        let population = records.len();

        let sample = sample_records(records, self.sample_size, self.seed)?;

        info!(
            "Loaded {} of {} flight records from {} (seed {}) in {:.2?}",
            sample.len(),
            population,
            self.source,
            self.seed,
            started.elapsed()
        );

        Ok(Dataset::new(sample))
    }
}

/// Pick `sample_size` records without replacement, reproducibly for `seed`.
///
/// Records keep the order in which they were drawn. Asking for more rows
/// than exist is an error rather than a silent truncation.
pub fn sample_records(
    records: Vec<FlightRecord>,
    sample_size: usize,
    seed: u64,
) -> Result<Vec<FlightRecord>> {
    if sample_size > records.len() {
        return Err(DashboardError::SampleTooLarge {
            requested: sample_size,
            available: records.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = index::sample(&mut rng, records.len(), sample_size);

    let mut slots: Vec<Option<FlightRecord>> = records.into_iter().map(Some).collect();
    Ok(picked
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn records(n: usize) -> Vec<FlightRecord> {
        (0..n)
            .map(|i| FlightRecord::new(2010 + (i % 3) as i32, 1 + (i % 12) as u32, format!("A{}", i)))
            .collect()
    }

    #[test]
    fn test_sample_is_reproducible_for_seed() {
        let a = sample_records(records(100), 10, 42).unwrap();
        let b = sample_records(records(100), 10, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let sample = sample_records(records(50), 50, 7).unwrap();
        let mut codes: Vec<_> = sample.iter().map(|r| r.reporting_airline.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 50);
    }

    #[test]
    fn test_oversized_sample_is_rejected() {
        let result = sample_records(records(3), 500, 42);
        assert!(matches!(
            result,
            Err(DashboardError::SampleTooLarge {
                requested: 500,
                available: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Year,Month,Reporting_Airline,CarrierDelay")?;
        for i in 0..20 {
            writeln!(temp_file, "2010,{},AA,{}.0", 1 + i % 12, i)?;
        }

        let loader = DatasetLoader::new(DataSource::File(temp_file.path().to_path_buf()))
            .with_sample_size(5)
            .with_seed(1);
        let dataset = loader.load(None).await?;

        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.years(), vec![2010]);

        Ok(())
    }
}
