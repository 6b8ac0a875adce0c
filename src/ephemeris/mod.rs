mod error;
pub mod geodetic;
pub mod kinematics;
pub mod nearest;
mod store;
pub mod time;
mod types;

pub use error::EphemerisError;
pub use store::EphemerisStore;
pub use types::{
    Altitude, DerivedLocation, DerivedSpeed, NearestResult, Place, RawStateVector, Series,
    StateRecord, Vector3, DEFAULT_POSITION_UNITS, DEFAULT_VELOCITY_UNITS, UNKNOWN_PLACE,
};

use chrono::{DateTime, Utc};

impl EphemerisStore {
    pub fn speed(&self, index: usize) -> Result<DerivedSpeed, EphemerisError> {
        let series = self.all();
        let record = series.get(index)?;
        Ok(kinematics::speed(&record.velocity, &series.velocity_units))
    }

    pub fn location(&self, index: usize) -> Result<DerivedLocation, EphemerisError> {
        let series = self.all();
        let record = series.get(index)?;
        geodetic::project(&record.position, &record.epoch, &series.position_units)
    }

    pub fn nearest(&self, reference: DateTime<Utc>) -> Result<NearestResult, EphemerisError> {
        nearest::resolve(&self.all(), reference)
    }
}
