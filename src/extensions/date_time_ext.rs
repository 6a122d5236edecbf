use crate::domain::ReferenceZone;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

pub trait InZone {
    fn in_zone(&self, zone: &ReferenceZone) -> DateTime<FixedOffset>;

    fn day_in(&self, zone: &ReferenceZone) -> NaiveDate {
        self.in_zone(zone).date_naive()
    }
}

impl<Tz: TimeZone> InZone for DateTime<Tz> {
    fn in_zone(&self, zone: &ReferenceZone) -> DateTime<FixedOffset> {
        let instant = self.with_timezone(&Utc);
        instant.with_timezone(&zone.offset_at(instant))
    }
}
