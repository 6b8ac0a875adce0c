use std::sync::{Arc, RwLock};

use super::error::EphemerisError;
use super::types::{Series, StateRecord};

/// Offset/limit window over the epoch list, parsed from query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochWindow {
    pub offset: usize,
    /// `None` means "to the end". Negative limits were clamped to zero.
    pub limit: Option<usize>,
}

/// An optionally signed run of ASCII digits, split into sign and magnitude.
/// Magnitudes too large for `usize` saturate.
fn parse_integer(name: &str, text: &str) -> Result<(bool, usize), EphemerisError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EphemerisError::InvalidArgument(format!(
            "{name} must be an integer, got {text:?}"
        )));
    }
    let magnitude = digits.parse::<usize>().unwrap_or(usize::MAX);
    Ok((negative && magnitude > 0, magnitude))
}

impl EpochWindow {
    pub fn parse(offset: Option<&str>, limit: Option<&str>) -> Result<Self, EphemerisError> {
        let offset = match offset.map(str::trim).filter(|s| !s.is_empty()) {
            None => 0,
            Some(text) => match parse_integer("offset", text)? {
                (true, _) => {
                    return Err(EphemerisError::InvalidArgument(format!(
                        "offset must not be negative, got {text}"
                    )))
                }
                (false, value) => value,
            },
        };

        let limit = match limit.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(text) => match parse_integer("limit", text)? {
                (true, _) => Some(0),
                (false, value) => Some(value),
            },
        };

        Ok(Self { offset, limit })
    }

    pub fn apply<'a>(&self, series: &'a Series) -> &'a [StateRecord] {
        let len = series.len();
        let start = self.offset.min(len);
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(len),
            None => len,
        };
        &series.records[start..end]
    }
}

/// The process-wide series. Whole-series replacement only; readers hold an
/// `Arc` snapshot, so a concurrent load is never observed half-applied.
#[derive(Debug, Default)]
pub struct EphemerisStore {
    current: RwLock<Arc<Series>>,
}

impl EphemerisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, series: Series) {
        let series = Arc::new(series);
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = series;
    }

    pub fn clear(&self) {
        self.load(Series::default());
    }

    pub fn all(&self) -> Arc<Series> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn slice(
        &self,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Vec<String>, EphemerisError> {
        let window = EpochWindow::parse(offset, limit)?;
        let series = self.all();
        Ok(window.apply(&series).iter().map(|r| r.epoch.clone()).collect())
    }

    /// Resolve index text against the current series. Non-integers are
    /// invalid arguments; negative or oversized integers are simply absent.
    pub fn index(&self, text: &str) -> Result<usize, EphemerisError> {
        let len = self.len();
        match parse_integer("epoch index", text.trim())? {
            (false, index) if index < len => Ok(index),
            _ => Err(EphemerisError::NotFound {
                index: text.trim().to_string(),
                len,
            }),
        }
    }

    pub fn get(&self, index: usize) -> Result<StateRecord, EphemerisError> {
        self.all().get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::Vector3;
    use rstest::rstest;

    fn record(i: usize) -> StateRecord {
        StateRecord {
            epoch: format!("2023-058T12:{:02}:00.000Z", i),
            position: Vector3::new(i as f64, 0.0, 0.0),
            velocity: Vector3::new(0.0, i as f64, 0.0),
        }
    }

    fn series(n: usize) -> Series {
        Series::new("km", "km/s", (0..n).map(record).collect())
    }

    fn loaded(n: usize) -> EphemerisStore {
        let store = EphemerisStore::new();
        store.load(series(n));
        store
    }

    #[rstest]
    #[case(None, None, 0, 10)]
    #[case(Some("2"), None, 2, 8)]
    #[case(None, Some("3"), 0, 3)]
    #[case(Some("8"), Some("5"), 8, 2)]
    #[case(Some("10"), Some("5"), 0, 0)]
    #[case(Some("42"), None, 0, 0)]
    #[case(Some("0"), Some("0"), 0, 0)]
    #[case(Some("1"), Some("-4"), 0, 0)]
    #[case(Some(""), Some(""), 0, 10)]
    #[case(None, Some("99999999999999999999"), 0, 10)]
    #[case(Some("2"), Some("18446744073709551616"), 2, 8)]
    #[case(Some("99999999999999999999"), None, 0, 0)]
    #[case(None, Some("-99999999999999999999"), 0, 0)]
    fn slice_counts(
        #[case] offset: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] first: usize,
        #[case] count: usize,
    ) {
        let store = loaded(10);
        let epochs = store.slice(offset, limit).unwrap();
        assert_eq!(epochs.len(), count);
        let expected: Vec<String> = (first..first + count).map(|i| record(i).epoch).collect();
        assert_eq!(epochs, expected);
    }

    #[rstest]
    #[case(Some("two"), None)]
    #[case(None, Some("1.5"))]
    #[case(Some("-1"), None)]
    #[case(Some("-99999999999999999999"), None)]
    #[case(None, Some("-"))]
    fn slice_rejects_bad_arguments(#[case] offset: Option<&str>, #[case] limit: Option<&str>) {
        let store = loaded(3);
        assert!(matches!(
            store.slice(offset, limit),
            Err(EphemerisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn get_matches_all() {
        let store = loaded(4);
        let all = store.all();
        for (i, r) in all.records.iter().enumerate() {
            assert_eq!(&store.get(i).unwrap(), r);
        }
        assert_eq!(
            store.get(4),
            Err(EphemerisError::NotFound {
                index: "4".into(),
                len: 4
            })
        );
    }

    #[rstest]
    #[case("0", Ok(0))]
    #[case(" 3 ", Ok(3))]
    #[case("+1", Ok(1))]
    #[case("4", Err("4"))]
    #[case("-1", Err("-1"))]
    #[case("99999999999999999999", Err("99999999999999999999"))]
    fn index_text_resolves_or_is_absent(#[case] text: &str, #[case] expected: Result<usize, &str>) {
        let store = loaded(4);
        let expected = expected.map_err(|index| EphemerisError::NotFound {
            index: index.to_string(),
            len: 4,
        });
        assert_eq!(store.index(text), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn index_text_must_be_an_integer(#[case] text: &str) {
        let store = loaded(4);
        assert!(matches!(
            store.index(text),
            Err(EphemerisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn clear_behaves_as_empty() {
        let store = loaded(4);
        store.clear();
        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.slice(None, None).unwrap().is_empty());
        assert!(matches!(store.get(0), Err(EphemerisError::NotFound { .. })));
    }

    #[test]
    fn snapshot_survives_reload() {
        let store = loaded(4);
        let before = store.all();
        store.load(series(2));
        assert_eq!(before.len(), 4);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn concurrent_reads_never_see_a_mixture() {
        let store = Arc::new(EphemerisStore::new());
        let generation = |g: usize| {
            let records = (0..50)
                .map(|i| StateRecord {
                    epoch: format!("2023-058T00:00:{:02}.000Z", i),
                    position: Vector3::new(g as f64, 0.0, 0.0),
                    velocity: Vector3::new(0.0, 0.0, 0.0),
                })
                .collect();
            Series::new("km", "km/s", records)
        };
        store.load(generation(0));

        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for g in 1..200 {
                    store.load(generation(g));
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let snapshot = store.all();
                        let g = snapshot.records[0].position.x;
                        assert!(snapshot.records.iter().all(|r| r.position.x == g));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
