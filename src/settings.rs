//! Runtime settings, layered lowest to highest: built-in defaults, an
//! optional TOML file, `DASHBOARD_*` environment variables, command-line
//! flags.

use crate::error::{DashboardError, Result};
use crate::readers::{DataSource, DatasetLoader};
use crate::utils::constants::{
    CONFIG_FILE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED, DEFAULT_SOURCE_URL,
    DEFAULT_YEAR, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// CSV location, URL or local path.
    #[validate(length(min = 1))]
    pub source: String,

    #[validate(range(min = 1))]
    pub sample_size: usize,

    pub seed: u64,

    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    /// Year shown when the page first loads.
    #[validate(length(min = 1))]
    pub default_year: String,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source: Option<String>,
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_URL.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_year: DEFAULT_YEAR.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Build the layered configuration.
    ///
    /// An explicit `config_path` must exist; otherwise `dashboard.toml` in
    /// the working directory is read when present.
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(CONFIG_FILE)).required(false),
        };

        let settings = Config::builder()
            .set_default("source", DEFAULT_SOURCE_URL)?
            .set_default("sample_size", DEFAULT_SAMPLE_SIZE as i64)?
            .set_default("seed", DEFAULT_SEED as i64)?
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("default_year", DEFAULT_YEAR)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("source", overrides.source.clone())?
            .set_override_option("sample_size", overrides.sample_size.map(|v| v as i64))?
            .set_override_option("seed", overrides.seed.map(|v| v as i64))?
            .set_override_option("host", overrides.host.clone())?
            .set_override_option("port", overrides.port.map(i64::from))?
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    pub fn loader(&self) -> DatasetLoader {
        DatasetLoader::new(self.data_source())
            .with_sample_size(self.sample_size)
            .with_seed(self.seed)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| DashboardError::InvalidAddress(addr))
    }
}
