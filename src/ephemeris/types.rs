use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::error::EphemerisError;

pub const DEFAULT_POSITION_UNITS: &str = "km";
pub const DEFAULT_VELOCITY_UNITS: &str = "km/s";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// One sampled epoch, ECI frame.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StateRecord {
    pub epoch: String,
    pub position: Vector3,
    pub velocity: Vector3,
}

/// State vector as it comes off the feed, components still textual.
#[derive(Debug, Clone, Default)]
pub struct RawStateVector {
    pub epoch: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub x_dot: String,
    pub y_dot: String,
    pub z_dot: String,
}

impl TryFrom<&RawStateVector> for StateRecord {
    type Error = EphemerisError;

    fn try_from(raw: &RawStateVector) -> Result<Self, Self::Error> {
        let number = |field: &'static str, value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| EphemerisError::InvalidRecord {
                    epoch: raw.epoch.clone(),
                    field,
                    value: value.to_string(),
                })
        };

        Ok(StateRecord {
            epoch: raw.epoch.trim().to_string(),
            position: Vector3::new(number("X", &raw.x)?, number("Y", &raw.y)?, number("Z", &raw.z)?),
            velocity: Vector3::new(
                number("X_DOT", &raw.x_dot)?,
                number("Y_DOT", &raw.y_dot)?,
                number("Z_DOT", &raw.z_dot)?,
            ),
        })
    }
}

/// The whole loaded series. Units are shared by every record.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Series {
    pub position_units: String,
    pub velocity_units: String,
    pub records: Vec<StateRecord>,
}

impl Default for Series {
    fn default() -> Self {
        Self {
            position_units: DEFAULT_POSITION_UNITS.to_string(),
            velocity_units: DEFAULT_VELOCITY_UNITS.to_string(),
            records: Vec::new(),
        }
    }
}

impl Series {
    pub fn new(
        position_units: impl Into<String>,
        velocity_units: impl Into<String>,
        records: Vec<StateRecord>,
    ) -> Self {
        Self {
            position_units: position_units.into(),
            velocity_units: velocity_units.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices are ordinals into the current series; a reload reassigns them.
    pub fn get(&self, index: usize) -> Result<&StateRecord, EphemerisError> {
        self.records.get(index).ok_or_else(|| EphemerisError::NotFound {
            index: index.to_string(),
            len: self.records.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DerivedSpeed {
    pub value: f64,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Altitude {
    pub value: f64,
    pub units: String,
}

pub const UNKNOWN_PLACE: &str = "location is unknown, likely over open ocean";

/// Reverse-geocoded description of a sub-point.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Place {
    Address(BTreeMap<String, String>),
    Unknown(String),
}

impl Place {
    pub fn from_lookup(address: Option<BTreeMap<String, String>>) -> Self {
        match address {
            Some(address) if !address.is_empty() => Place::Address(address),
            _ => Place::Unknown(UNKNOWN_PLACE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DerivedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Altitude,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NearestResult {
    pub matched_epoch: String,
    /// reference - matched epoch, in seconds
    pub offset_seconds: f64,
    pub location: DerivedLocation,
    pub speed: DerivedSpeed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawStateVector {
        RawStateVector {
            epoch: "2023-058T12:00:00.000Z".into(),
            x: "-4627.8".into(),
            y: " 1.5e3 ".into(),
            z: "0".into(),
            x_dot: "3".into(),
            y_dot: "4".into(),
            z_dot: "-0.25".into(),
        }
    }

    #[test]
    fn converts_raw_components() {
        let record = StateRecord::try_from(&raw()).unwrap();
        assert_eq!(record.position, Vector3::new(-4627.8, 1500.0, 0.0));
        assert_eq!(record.velocity, Vector3::new(3.0, 4.0, -0.25));
    }

    #[test]
    fn rejects_non_numeric_component() {
        let mut bad = raw();
        bad.y_dot = "fast".into();
        assert_eq!(
            StateRecord::try_from(&bad),
            Err(EphemerisError::InvalidRecord {
                epoch: "2023-058T12:00:00.000Z".into(),
                field: "Y_DOT",
                value: "fast".into(),
            })
        );
    }

    #[test]
    fn empty_lookup_becomes_placeholder() {
        assert_eq!(Place::from_lookup(None), Place::Unknown(UNKNOWN_PLACE.into()));
        assert_eq!(
            Place::from_lookup(Some(BTreeMap::new())),
            Place::Unknown(UNKNOWN_PLACE.into())
        );
    }
}
