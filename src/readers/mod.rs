pub mod dataset_loader;
pub mod flight_reader;
pub mod source;

pub use dataset_loader::{sample_records, DatasetLoader};
pub use flight_reader::FlightReader;
pub use source::DataSource;
