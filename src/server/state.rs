use crate::charts::LineChartBuilder;
use crate::models::Dataset;
use crate::processors::DelayAggregator;
use crate::utils::constants::DEFAULT_YEAR;
use std::sync::Arc;

/// Shared by every request. The dataset is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub aggregator: Arc<DelayAggregator>,
    pub charts: Arc<LineChartBuilder>,
    pub default_year: String,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            aggregator: Arc::new(DelayAggregator::new()),
            charts: Arc::new(LineChartBuilder::new()),
            default_year: DEFAULT_YEAR.to_string(),
        }
    }

    pub fn with_default_year(mut self, year: &str) -> Self {
        self.default_year = year.to_string();
        self
    }
}
