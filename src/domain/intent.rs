use crate::domain::{LocationPoint, RawFix};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Identifies one feed subscription of a tracking session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the tracker reacts to, processed one at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    DaySelected(NaiveDate),
    StartTracking,
    StopTracking,
    /// A fix forwarded from a feed subscription, not yet recorded.
    FixReceived { subscription: SubscriptionId, fix: RawFix },
    PointRecorded(LocationPoint),
    ErrorOccurred(String),
    ErrorDismissed,
}
