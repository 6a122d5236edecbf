use crate::domain::{LocationPoint, ReferenceZone};
use crate::extensions::date_time_ext::InZone;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;

/// Which offset decides the calendar day of a recorded point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    /// The offset stamped on the point when it was recorded.
    #[default]
    RecordTime,
    /// The reference zone's offset for the point's instant, evaluated when queried.
    QueryTime,
}

/// Calendar-day policy shared by recording (stamping) and querying (bucketing).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Calendar {
    #[serde(default)]
    zone: ReferenceZone,
    #[serde(default)]
    day_boundary: DayBoundary,
}

impl Calendar {
    #[cfg(test)]
    pub fn new(zone: ReferenceZone, day_boundary: DayBoundary) -> Self {
        Calendar { zone, day_boundary }
    }

    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    pub fn stamp(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.in_zone(&self.zone)
    }

    pub fn day_of(&self, point: &LocationPoint) -> NaiveDate {
        match self.day_boundary {
            DayBoundary::RecordTime => point.timestamp.date_naive(),
            DayBoundary::QueryTime => point.timestamp.day_in(&self.zone),
        }
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().day_in(&self.zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn zone(s: &str) -> ReferenceZone {
        s.parse().unwrap()
    }

    #[test]
    fn stamp_uses_the_reference_zone_offset() {
        let calendar = Calendar::new(zone("+08:00"), DayBoundary::RecordTime);
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 17, 0, 0).unwrap();

        assert_eq!(calendar.stamp(instant).to_rfc3339(), "2024-05-02T01:00:00+08:00");
    }

    #[test]
    fn record_time_keeps_the_day_after_a_zone_change() {
        let recorded_in = Calendar::new(zone("+08:00"), DayBoundary::RecordTime);
        let point = LocationPoint::new(0.0, 0.0, recorded_in.stamp(Utc.with_ymd_and_hms(2024, 5, 1, 17, 0, 0).unwrap()));

        let queried_in = Calendar::new(zone("utc"), DayBoundary::RecordTime);

        assert_eq!(queried_in.day_of(&point), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn query_time_recomputes_the_day_after_a_zone_change() {
        let recorded_in = Calendar::new(zone("+08:00"), DayBoundary::QueryTime);
        let point = LocationPoint::new(0.0, 0.0, recorded_in.stamp(Utc.with_ymd_and_hms(2024, 5, 1, 17, 0, 0).unwrap()));

        let queried_in = Calendar::new(zone("utc"), DayBoundary::QueryTime);

        assert_eq!(recorded_in.day_of(&point), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(queried_in.day_of(&point), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn deserializes_with_defaults() -> Result<(), serde_json::Error> {
        let calendar: Calendar = serde_json::from_str(r#"{ "day_boundary": "query_time" }"#)?;

        assert_eq!(calendar, Calendar::new(ReferenceZone::Local, DayBoundary::QueryTime));
        Ok(())
    }
}
