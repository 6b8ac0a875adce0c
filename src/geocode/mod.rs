use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::ephemeris::{DerivedLocation, Place};
use crate::web::config::GeocoderConfig;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<String>,
}

pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
    zoom: u8,
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            zoom: config.zoom,
        })
    }

    /// Address breakdown for a lat/lon pair, `None` when nothing is there.
    pub async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<BTreeMap<String, String>>, GeocodeError> {
        let response: ReverseResponse = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", self.zoom.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(reason) = response.error {
            log::debug!("No address for ({}, {}): {}", latitude, longitude, reason);
            return Ok(None);
        }

        Ok(response.address.map(|address| {
            address
                .into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        }))
    }
}

pub enum Geocoder {
    Disabled,
    Nominatim(NominatimClient),
}

impl Geocoder {
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        if config.enabled {
            Ok(Geocoder::Nominatim(NominatimClient::new(config)?))
        } else {
            Ok(Geocoder::Disabled)
        }
    }

    /// Resolve a place for the sub-point. Lookup failures degrade to the
    /// unknown-location placeholder.
    pub async fn place(&self, latitude: f64, longitude: f64) -> Place {
        let address = match self {
            Geocoder::Disabled => None,
            Geocoder::Nominatim(client) => match client.reverse(latitude, longitude).await {
                Ok(address) => address,
                Err(e) => {
                    log::warn!("Reverse geocoding failed: {}", e);
                    None
                }
            },
        };
        Place::from_lookup(address)
    }

    pub async fn annotate(&self, mut location: DerivedLocation) -> DerivedLocation {
        location.place = Some(self.place(location.latitude, location.longitude).await);
        location
    }
}
