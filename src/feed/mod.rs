mod error;
mod oem;

use std::path::PathBuf;
use std::time::Duration;

pub use error::FeedError;
pub use oem::{parse_oem, Ancillary, FeedDocument};

#[cfg(test)]
pub(crate) use oem::tests::SAMPLE as SAMPLE_OEM;

use crate::web::config::FeedConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    pub fn from_config(config: &FeedConfig) -> Option<Self> {
        match (&config.path, &config.url) {
            (Some(path), _) => Some(FeedSource::File(path.clone())),
            (None, Some(url)) => Some(FeedSource::Url(url.clone())),
            (None, None) => None,
        }
    }
}

/// Fetches and decodes the ephemeris document. Every call is a fresh fetch.
pub struct FeedLoader {
    source: Option<FeedSource>,
    client: reqwest::Client,
}

impl FeedLoader {
    pub fn new(source: Option<FeedSource>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { source, client })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        Self::new(FeedSource::from_config(config), config.timeout)
    }

    pub async fn fetch(&self) -> Result<FeedDocument, FeedError> {
        let xml = match self.source.as_ref().ok_or(FeedError::NoSource)? {
            FeedSource::Url(url) => {
                log::info!("Fetching ephemeris from {}", url);
                self.client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
            FeedSource::File(path) => {
                log::info!("Reading ephemeris from {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
        };

        let document = parse_oem(&xml)?;
        log::info!("Decoded {} state vectors", document.series.len());
        Ok(document)
    }
}
