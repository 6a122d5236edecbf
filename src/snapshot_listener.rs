use crate::domain::intent::Intent;
use crate::domain::{Coordinate, Viewport};
use crate::view_state::ViewSnapshot;
use tokio::sync::mpsc::WeakSender;
use tokio::sync::watch::Receiver;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// What a map display draws for a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub markers: Vec<Marker>,
    /// Only present for two or more points, in snapshot order.
    pub path: Option<Vec<Coordinate>>,
    pub region: Option<Viewport>,
    pub tracking_button_label: &'static str,
    pub alert: Option<String>,
}

impl From<&ViewSnapshot> for RenderPlan {
    fn from(snapshot: &ViewSnapshot) -> Self {
        let markers = snapshot
            .points
            .iter()
            .map(|point| Marker {
                coordinate: point.coordinate(),
                title: point.title.clone(),
                subtitle: point.subtitle.clone(),
            })
            .collect::<Vec<_>>();

        let path: Option<Vec<Coordinate>> = (markers.len() > 1).then(|| markers.iter().map(|marker| marker.coordinate).collect());

        RenderPlan {
            markers,
            path,
            region: snapshot.viewport,
            tracking_button_label: if snapshot.tracking.is_active() { "Stop tracking" } else { "Start tracking" },
            alert: snapshot.error.clone(),
        }
    }
}

/// Renders every snapshot to the log. An alert is shown once and then dismissed.
#[instrument(skip_all)]
pub async fn snapshot_listener(mut rx: Receiver<ViewSnapshot>, intents: WeakSender<Intent>) {
    let mut snapshot: ViewSnapshot = rx.borrow_and_update().clone();
    loop {
        let plan = render(&snapshot);
        if plan.alert.is_some() {
            let Some(tx) = intents.upgrade() else {
                return;
            };
            tx.send(Intent::ErrorDismissed).await.unwrap_or_default();
        }

        if rx.changed().await.is_err() {
            return;
        }
        snapshot = rx.borrow_and_update().clone();
    }
}

fn render(snapshot: &ViewSnapshot) -> RenderPlan {
    let plan = RenderPlan::from(snapshot);
    let center = plan
        .region
        .map(|region| {
            format!(
                "({:.5}, {:.5}) spanning {}x{} m",
                region.center.latitude, region.center.longitude, region.latitudinal_span_m, region.longitudinal_span_m
            )
        })
        .unwrap_or_else(|| "-".to_string());

    info!(
        day = %snapshot.selected_day,
        markers = plan.markers.len(),
        path = plan.path.is_some(),
        "🗺️ {} marker(s), centered on {}, [{}]",
        plan.markers.len(),
        center,
        plan.tracking_button_label
    );

    for marker in plan.markers.iter().filter(|marker| marker.title.is_some() || marker.subtitle.is_some()) {
        #[rustfmt::skip]
        debug!(subtitle = marker.subtitle.as_deref(), "📌 {}", marker.title.as_deref().unwrap_or("untitled"));
    }

    if let Some(alert) = &plan.alert {
        warn!("⚠️ {}", alert);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationPoint, TrackingStatus};
    use crate::view_state::compute_viewport;
    use chrono::{DateTime, NaiveDate};
    use pretty_assertions::assert_eq;

    fn point(latitude: f64, longitude: f64) -> LocationPoint {
        LocationPoint::new(latitude, longitude, DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap())
    }

    fn snapshot(points: Vec<LocationPoint>) -> ViewSnapshot {
        ViewSnapshot {
            viewport: compute_viewport(&points, 1_000.0),
            points,
            ..ViewSnapshot::initial(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        }
    }

    #[test]
    fn a_single_point_gets_a_marker_but_no_path() {
        let plan = RenderPlan::from(&snapshot(vec![LocationPoint {
            title: Some("Home".to_string()),
            ..point(1.0, 2.0)
        }]));

        assert_eq!(
            plan.markers,
            vec![Marker {
                coordinate: Coordinate { latitude: 1.0, longitude: 2.0 },
                title: Some("Home".to_string()),
                subtitle: None,
            }]
        );
        assert_eq!(plan.path, None);
        assert_eq!(plan.region.map(|region| region.center), Some(Coordinate { latitude: 1.0, longitude: 2.0 }));
    }

    #[test]
    fn two_or_more_points_are_connected_in_snapshot_order() {
        let plan = RenderPlan::from(&snapshot(vec![point(3.0, 3.0), point(1.0, 1.0), point(2.0, 2.0)]));

        assert_eq!(
            plan.path,
            Some(vec![
                Coordinate { latitude: 3.0, longitude: 3.0 },
                Coordinate { latitude: 1.0, longitude: 1.0 },
                Coordinate { latitude: 2.0, longitude: 2.0 },
            ])
        );
    }

    #[test]
    fn button_label_and_alert_follow_the_snapshot() {
        let idle = RenderPlan::from(&snapshot(vec![]));
        let active = RenderPlan::from(&ViewSnapshot {
            tracking: TrackingStatus::Active,
            error: Some("location signal lost".to_string()),
            ..snapshot(vec![])
        });

        assert_eq!(idle.tracking_button_label, "Start tracking");
        assert_eq!(idle.alert, None);
        assert_eq!(idle.region, None);
        assert_eq!(active.tracking_button_label, "Stop tracking");
        assert_eq!(active.alert, Some("location signal lost".to_string()));
    }
}
