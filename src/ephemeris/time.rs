//! Feed timestamps: `YYYY-DDDThh:mm:ss[.sss]Z`, UTC, day-of-year based.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

use super::error::EphemerisError;

pub const EPOCH_FORMAT: &str = "%Y-%jT%H:%M:%S%.3fZ";

/// Parse a feed epoch into a UTC instant, keeping fractional seconds.
pub fn parse_epoch(epoch: &str) -> Result<DateTime<Utc>, EphemerisError> {
    let malformed = || EphemerisError::MalformedTimestamp(epoch.to_string());

    let body = epoch.strip_suffix('Z').ok_or_else(malformed)?;
    let (date, time) = body.split_once('T').ok_or_else(malformed)?;
    let (year, doy) = date.split_once('-').ok_or_else(malformed)?;

    let year: i32 = digits(year, 4).ok_or_else(malformed)?;
    let doy: u32 = digits(doy, 3).ok_or_else(malformed)?;
    let date = NaiveDate::from_yo_opt(year, doy).ok_or_else(malformed)?;

    let (hms, fraction) = match time.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (time, None),
    };
    let mut fields = hms.split(':');
    let hour: u32 = fields.next().and_then(|f| digits(f, 2)).ok_or_else(malformed)?;
    let minute: u32 = fields.next().and_then(|f| digits(f, 2)).ok_or_else(malformed)?;
    let second: u32 = fields.next().and_then(|f| digits(f, 2)).ok_or_else(malformed)?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    let nanos = match fraction {
        None => 0,
        Some(f) if f.is_empty() || f.len() > 9 || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(malformed())
        }
        Some(f) => {
            let scale = 10u32.pow(9 - f.len() as u32);
            f.parse::<u32>().map_err(|_| malformed())? * scale
        }
    };

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(malformed)?;
    Ok(date.and_time(time).and_utc())
}

/// Render an instant in the feed's format, millisecond precision.
pub fn format_epoch(instant: &DateTime<Utc>) -> String {
    instant.format(EPOCH_FORMAT).to_string()
}

/// Hour and minute of an epoch, as used by the longitude correction.
pub fn extract_hour_minute(epoch: &str) -> Result<(u32, u32), EphemerisError> {
    let instant = parse_epoch(epoch)?;
    Ok((instant.hour(), instant.minute()))
}

/// Accept either a feed epoch or an RFC 3339 timestamp.
pub fn parse_reference(text: &str) -> Result<DateTime<Utc>, EphemerisError> {
    parse_epoch(text).or_else(|_| {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| EphemerisError::MalformedTimestamp(text.to_string()))
    })
}

fn digits<T: std::str::FromStr>(field: &str, width: usize) -> Option<T> {
    if field.len() != width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use rstest::rstest;

    #[test]
    fn parses_day_of_year() {
        let t = parse_epoch("2023-058T12:00:00.000Z").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2023, 2, 27, 12, 0, 0).unwrap());
    }

    #[test]
    fn keeps_fractional_seconds() {
        let t = parse_epoch("2024-001T00:00:01.250Z").unwrap();
        assert_eq!(t.timestamp(), 1_704_067_201);
        assert_eq!(t.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn fraction_is_optional() {
        let t = parse_epoch("2024-366T23:59:59Z").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 12, 31));
    }

    #[rstest]
    #[case("")]
    #[case("2023-058T12:00:00.000")]
    #[case("2023-58T12:00:00.000Z")]
    #[case("23-058T12:00:00.000Z")]
    #[case("2023-02-27T12:00:00Z")]
    #[case("2023-367T12:00:00.000Z")]
    #[case("2023-000T12:00:00.000Z")]
    #[case("2023-058T24:00:00.000Z")]
    #[case("2023-058T12:60:00.000Z")]
    #[case("2023-058T12:00:00.Z")]
    #[case("2023-058T12:00:00:00Z")]
    #[case("2023-058T1a:00:00.000Z")]
    fn rejects_malformed(#[case] input: &str) {
        assert_eq!(
            parse_epoch(input),
            Err(EphemerisError::MalformedTimestamp(input.to_string()))
        );
    }

    #[rstest]
    #[case(Utc.with_ymd_and_hms(2023, 2, 27, 12, 0, 0).unwrap())]
    #[case(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap())]
    #[case(Utc.timestamp_millis_opt(1_700_000_123_456).unwrap())]
    fn format_then_parse_is_identity(#[case] t: DateTime<Utc>) {
        assert_eq!(parse_epoch(&format_epoch(&t)).unwrap(), t);
    }

    #[test]
    fn hour_minute_agrees_with_parse() {
        assert_eq!(extract_hour_minute("2023-058T07:43:12.000Z").unwrap(), (7, 43));
        assert!(extract_hour_minute("not a time").is_err());
    }

    #[test]
    fn reference_accepts_rfc3339() {
        let a = parse_reference("2023-058T12:00:00.000Z").unwrap();
        let b = parse_reference("2023-02-27T12:00:00Z").unwrap();
        assert_eq!(a, b);
        assert!(parse_reference("yesterday").is_err());
    }
}
