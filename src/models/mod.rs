pub mod aggregate;
pub mod dataset;
pub mod flight;

pub use aggregate::{AggregateRow, AggregateTable, DelayAggregates};
pub use dataset::Dataset;
pub use flight::{DelayCause, FlightRecord, FlightRecordBuilder};
