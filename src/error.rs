use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Data source {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Cannot take a sample of {requested} rows from {available} available rows")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("Invalid year '{input}': {source}")]
    InvalidYear {
        input: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid server address: {0}")]
    InvalidAddress(String),
}
