use crate::domain::Coordinate;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A recorded position in the location history.
///
/// The timestamp keeps the offset of the reference zone at the moment the point was recorded, which
/// is what record-time day bucketing relies on. Comparing two timestamps compares instants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<FixedOffset>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl LocationPoint {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<FixedOffset>) -> Self {
        LocationPoint {
            latitude,
            longitude,
            timestamp,
            title: None,
            subtitle: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
