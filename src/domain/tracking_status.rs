use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingStatus {
    #[default]
    Idle,
    Active,
}

impl TrackingStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TrackingStatus::Active)
    }
}

impl Display for TrackingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingStatus::Idle => write!(f, "idle"),
            TrackingStatus::Active => write!(f, "active"),
        }
    }
}
