use crate::error::{DashboardError, Result};
use reqwest::StatusCode;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the flight CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Fetch the raw bytes of the source
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Url(url) => {
                info!("Downloading flight data from {}", url);
                let response = reqwest::get(url).await?;
                check_status(url, response.status())?;
                let bytes = response.bytes().await?;
                debug!("Downloaded {} bytes", bytes.len());
                Ok(bytes.to_vec())
            }
            DataSource::File(path) => {
                info!("Reading flight data from {}", path.display());
                Ok(tokio::fs::read(path).await?)
            }
        }
    }
}

/// Anything but a 2xx answer means the data never arrived.
fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DashboardError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
