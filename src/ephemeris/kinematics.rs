use super::types::{DerivedSpeed, Vector3};

/// Magnitude of a velocity vector, labelled with the series velocity unit.
pub fn speed(velocity: &Vector3, units: &str) -> DerivedSpeed {
    DerivedSpeed {
        value: velocity.norm(),
        units: units.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_four_five() {
        let s = speed(&Vector3::new(3.0, 4.0, 0.0), "km/s");
        assert_eq!(s.value, 5.0);
        assert_eq!(s.units, "km/s");
    }

    #[test]
    fn units_follow_the_series() {
        let s = speed(&Vector3::new(0.0, 0.0, -2.0), "m/s");
        assert_eq!(s, DerivedSpeed { value: 2.0, units: "m/s".into() });
    }
}
