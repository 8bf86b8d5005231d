pub mod delay_analyzer;

pub use delay_analyzer::{CauseStats, DatasetStatistics, DelayAnalyzer};
