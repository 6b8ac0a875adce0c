use super::error::EphemerisError;
use super::time::extract_hour_minute;
use super::types::{Altitude, DerivedLocation, Vector3};

/// Mean Earth radius in meters. Subtracted as-is from the position norm,
/// whatever the position unit is.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

const DEGREES_PER_HOUR: f64 = 360.0 / 24.0;

/// Project an ECI position onto latitude/longitude/altitude. `place` is left
/// unset for the geocoder to fill in.
pub fn project(
    position: &Vector3,
    epoch: &str,
    units: &str,
) -> Result<DerivedLocation, EphemerisError> {
    let (hour, minute) = extract_hour_minute(epoch)?;
    let Vector3 { x, y, z } = *position;

    let latitude = z.atan2((x * x + y * y).sqrt()).to_degrees();
    let longitude = earth_fixed_longitude(y.atan2(x).to_degrees(), hour, minute);

    Ok(DerivedLocation {
        latitude,
        longitude,
        altitude: Altitude {
            value: position.norm() - MEAN_EARTH_RADIUS,
            units: units.to_string(),
        },
        place: None,
    })
}

/// Empirical rotation correction relative to 12:00, then the two-step
/// reflection back into [-180, 180]. This is not a modulo wrap.
pub fn earth_fixed_longitude(inertial_deg: f64, hour: u32, minute: u32) -> f64 {
    let rotated = ((hour as f64 - 12.0) + minute as f64 / 60.0) * DEGREES_PER_HOUR;
    let mut lon = inertial_deg - rotated + 360.0;

    if lon > 180.0 {
        lon = 180.0 - (lon - 180.0);
    }
    if lon < -180.0 {
        lon = -180.0 - (lon + 180.0);
    }
    lon
}
