use crate::domain::intent::Intent;
use crate::domain::{Coordinate, LocationPoint, TrackingStatus, Viewport};
use crate::store::LocationStore;
use chrono::NaiveDate;

pub const DEFAULT_VIEWPORT_SPAN_M: f64 = 1_000.0;

/// What the map shows: the points of the selected day and how to frame them.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot {
    pub selected_day: NaiveDate,
    pub points: Vec<LocationPoint>,
    pub tracking: TrackingStatus,
    pub viewport: Option<Viewport>,
    pub error: Option<String>,
}

impl ViewSnapshot {
    pub fn initial(selected_day: NaiveDate) -> Self {
        ViewSnapshot {
            selected_day,
            points: Vec::new(),
            tracking: TrackingStatus::Idle,
            viewport: None,
            error: None,
        }
    }
}

/// Read-only inputs the reducer may consult.
#[derive(Debug)]
pub struct ReduceContext<'a> {
    store: &'a LocationStore,
    tracking: TrackingStatus,
    viewport_span_m: f64,
}

impl<'a> ReduceContext<'a> {
    pub fn new(store: &'a LocationStore, tracking: TrackingStatus, viewport_span_m: f64) -> Self {
        ReduceContext {
            store,
            tracking,
            viewport_span_m,
        }
    }
}

/// Computes the snapshot that follows `snapshot` once `intent` has been applied.
///
/// Side effects belong to the caller: the session is started or stopped and a recorded point is
/// already in the store before the corresponding intent reaches the reducer.
pub fn reduce(snapshot: &ViewSnapshot, intent: &Intent, context: &ReduceContext) -> ViewSnapshot {
    match intent {
        Intent::DaySelected(day) => ViewSnapshot {
            selected_day: *day,
            error: None,
            ..refresh_points(snapshot, *day, context)
        },
        Intent::StartTracking | Intent::StopTracking => ViewSnapshot {
            tracking: context.tracking,
            ..snapshot.clone()
        },
        Intent::PointRecorded(point) => {
            if context.store.calendar().day_of(point) == snapshot.selected_day {
                refresh_points(snapshot, snapshot.selected_day, context)
            } else {
                snapshot.clone()
            }
        }
        Intent::ErrorOccurred(message) => ViewSnapshot {
            error: Some(message.clone()),
            ..snapshot.clone()
        },
        Intent::ErrorDismissed => ViewSnapshot {
            error: None,
            ..snapshot.clone()
        },
        // Recorded by the tracking session, which then emits `PointRecorded`
        Intent::FixReceived { .. } => snapshot.clone(),
    }
}

fn refresh_points(snapshot: &ViewSnapshot, day: NaiveDate, context: &ReduceContext) -> ViewSnapshot {
    let points = context.store.points_on_day(day);
    let viewport = compute_viewport(&points, context.viewport_span_m).or(snapshot.viewport);

    ViewSnapshot {
        points,
        viewport,
        ..snapshot.clone()
    }
}

/// Centers on the mean latitude and longitude with a fixed span. This does not fit the span to the
/// points and is not correct for tracks crossing the antimeridian.
pub fn compute_viewport(points: &[LocationPoint], span_m: f64) -> Option<Viewport> {
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let latitude = points.iter().map(|p| p.latitude).sum::<f64>() / count;
    let longitude = points.iter().map(|p| p.longitude).sum::<f64>() / count;

    Some(Viewport {
        center: Coordinate { latitude, longitude },
        latitudinal_span_m: span_m,
        longitudinal_span_m: span_m,
    })
}
