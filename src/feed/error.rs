use thiserror::Error;

use crate::ephemeris::EphemerisError;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid OEM document: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("{0}")]
    Record(#[from] EphemerisError),
    #[error("no feed source configured")]
    NoSource,
}
