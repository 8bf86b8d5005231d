pub mod delay_aggregator;

pub use delay_aggregator::{parse_year, DelayAggregator};
