use chrono::{DateTime, Utc};

use super::error::EphemerisError;
use super::geodetic::project;
use super::kinematics::speed;
use super::time::parse_epoch;
use super::types::{NearestResult, Series};

/// Index of the epoch closest to `reference`, with the signed offset
/// `reference - epoch` in seconds. Ties go to the earlier record.
pub fn nearest_index(
    series: &Series,
    reference: DateTime<Utc>,
) -> Result<(usize, f64), EphemerisError> {
    if series.is_empty() {
        return Err(EphemerisError::EmptySeries);
    }

    let mut best: Option<(usize, f64)> = None;

    for (i, record) in series.records.iter().enumerate() {
        let epoch = parse_epoch(&record.epoch)?;
        let delta = reference - epoch;
        let offset = delta.num_seconds() as f64 + delta.subsec_nanos() as f64 * 1e-9;

        match best {
            Some((_, current)) if offset.abs() >= current.abs() => {}
            _ => best = Some((i, offset)),
        }
    }

    best.ok_or(EphemerisError::EmptySeries)
}

/// Location and speed of the sample closest to `reference`.
pub fn resolve(series: &Series, reference: DateTime<Utc>) -> Result<NearestResult, EphemerisError> {
    let (index, offset_seconds) = nearest_index(series, reference)?;
    let record = &series.records[index];

    Ok(NearestResult {
        matched_epoch: record.epoch.clone(),
        offset_seconds,
        location: project(&record.position, &record.epoch, &series.position_units)?,
        speed: speed(&record.velocity, &series.velocity_units),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::time::format_epoch;
    use crate::ephemeris::types::{StateRecord, Vector3};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 2, 27, 12, 0, 0).unwrap()
    }

    /// Three samples, 60 s apart, starting at noon.
    fn series() -> Series {
        let records = (0..3)
            .map(|i| StateRecord {
                epoch: format_epoch(&(start() + Duration::seconds(60 * i))),
                position: Vector3::new(6_778.0, 0.0, 0.0),
                velocity: Vector3::new(3.0, 4.0, 0.0),
            })
            .collect();
        Series::new("km", "km/s", records)
    }

    #[test]
    fn exact_match_on_middle_epoch() {
        let result = resolve(&series(), start() + Duration::seconds(60)).unwrap();
        assert_eq!(result.matched_epoch, "2023-058T12:01:00.000Z");
        assert_eq!(result.offset_seconds, 0.0);
        assert_eq!(result.speed.value, 5.0);
        assert_eq!(result.speed.units, "km/s");
        assert_eq!(result.location.altitude.units, "km");
    }

    #[test]
    fn equidistant_prefers_earlier() {
        let (index, offset) = nearest_index(&series(), start() + Duration::seconds(90)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(offset, 30.0);
    }

    #[test]
    fn offset_is_signed() {
        let (index, offset) =
            nearest_index(&series(), start() - Duration::milliseconds(2_500)).unwrap();
        assert_eq!(index, 0);
        assert_eq!(offset, -2.5);

        let (index, offset) = nearest_index(&series(), start() + Duration::hours(1)).unwrap();
        assert_eq!(index, 2);
        assert_eq!(offset, 3_480.0);
    }

    #[test]
    fn empty_series() {
        assert_eq!(
            resolve(&Series::default(), start()),
            Err(EphemerisError::EmptySeries)
        );
    }

    #[test]
    fn malformed_epoch_fails_the_query() {
        let mut s = series();
        s.records[2].epoch = "2023-02-27 12:02".into();
        assert!(matches!(
            nearest_index(&s, start()),
            Err(EphemerisError::MalformedTimestamp(_))
        ));
    }
}
