/// Airline on-time performance sample published with the IBM data-visualisation course
pub const DEFAULT_SOURCE_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/airline_data.csv";

/// Sampling defaults
pub const DEFAULT_SAMPLE_SIZE: usize = 500;
pub const DEFAULT_SEED: u64 = 42;

/// Year input
pub const DEFAULT_YEAR: &str = "2010";
pub const YEAR_HINT_MIN: i32 = 2010;
pub const YEAR_HINT_MAX: i32 = 2020;

/// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Configuration sources
pub const CONFIG_FILE: &str = "dashboard.toml";
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Page
pub const DASHBOARD_TITLE: &str = "Flight Delay Time Statistics";
