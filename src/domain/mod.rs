mod calendar;
mod coordinate;
pub mod intent;
mod location_point;
mod raw_fix;
mod reference_zone;
mod tracking_status;
mod viewport;

pub use calendar::{Calendar, DayBoundary};
pub use coordinate::{Coordinate, CoordinateError};
pub use location_point::LocationPoint;
pub use raw_fix::RawFix;
pub use reference_zone::ReferenceZone;
pub use tracking_status::TrackingStatus;
pub use viewport::Viewport;
