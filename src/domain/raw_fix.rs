use crate::domain::{Calendar, LocationPoint};
use chrono::{DateTime, Utc};

/// A single position reading as delivered by a location feed.
#[derive(Clone, Debug, PartialEq)]
pub struct RawFix {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub accuracy_m: Option<f64>,
    pub speed_mps: Option<f64>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl RawFix {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        RawFix {
            latitude,
            longitude,
            timestamp,
            accuracy_m: None,
            speed_mps: None,
            title: None,
            subtitle: None,
        }
    }

    /// Stamps the fix with the calendar's reference offset. Accuracy and speed are not part of the
    /// history and are dropped here.
    pub fn into_point(self, calendar: &Calendar) -> LocationPoint {
        LocationPoint {
            title: self.title,
            subtitle: self.subtitle,
            ..LocationPoint::new(self.latitude, self.longitude, calendar.stamp(self.timestamp))
        }
    }
}
