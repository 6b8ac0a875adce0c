use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub feed: FeedConfig,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

pub const ISS_OEM_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: Option<String>,
    /// Local OEM file, used instead of `url` when set.
    pub path: Option<PathBuf>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: Some(ISS_OEM_URL.to_string()),
            path: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub user_agent: String,
    pub zoom: u8,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org/reverse".to_string(),
            user_agent: concat!("iss-tracker/", env!("CARGO_PKG_VERSION")).to_string(),
            zoom: 15,
            timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load `path` if given, otherwise use the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:5000");
        assert_eq!(config.feed.url.as_deref(), Some(ISS_OEM_URL));
        assert_eq!(config.feed.timeout, Duration::from_secs(30));
        assert!(config.geocoder.enabled);
    }

    #[test]
    fn reads_sections() {
        let config = Config::from_str(
            r#"
web:
  bind: "127.0.0.1:8080"
feed:
  path: /var/lib/iss/oem.xml
  timeout: 1m 30s
geocoder:
  enabled: false
  zoom: 10
"#,
        )
        .unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:8080");
        assert_eq!(config.feed.path, Some(PathBuf::from("/var/lib/iss/oem.xml")));
        assert_eq!(config.feed.url.as_deref(), Some(ISS_OEM_URL));
        assert_eq!(config.feed.timeout, Duration::from_secs(90));
        assert!(!config.geocoder.enabled);
        assert_eq!(config.geocoder.zoom, 10);
        assert_eq!(config.geocoder.timeout, Duration::from_secs(10));
    }

    #[test]
    fn rejects_bad_duration() {
        assert!(matches!(
            Config::from_str("feed:\n  timeout: soon\n"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
