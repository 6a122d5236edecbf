use crate::domain::intent::{Intent, SubscriptionId};
use crate::domain::{Coordinate, CoordinateError, LocationPoint, RawFix, TrackingStatus};
use crate::feed::{FeedEvent, FeedSubscription, LocationFeed};
use crate::store::{LocationStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{Sender, WeakSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Decides whether fixes from the location feed become history entries.
#[derive(Debug)]
pub struct TrackingSession {
    status: TrackingStatus,
    feed: Arc<dyn LocationFeed>,
    intents: WeakSender<Intent>,
    forwarder: Option<JoinHandle<()>>,
    subscriptions_started: u64,
    validate_coordinates: bool,
}

impl TrackingSession {
    /// Fixes and feed errors are forwarded as intents through `intents`. The session only holds a weak
    /// handle, so it never keeps the intent channel open on its own.
    pub fn new(feed: Arc<dyn LocationFeed>, intents: WeakSender<Intent>, validate_coordinates: bool) -> Self {
        TrackingSession {
            status: TrackingStatus::Idle,
            feed,
            intents,
            forwarder: None,
            subscriptions_started: 0,
            validate_coordinates,
        }
    }

    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    /// Subscribes to the feed. Returns whether the session transitioned; starting while active is a no-op.
    #[instrument(skip_all)]
    pub fn start(&mut self) -> bool {
        if self.status.is_active() {
            debug!("📍 Tracking is already active");
            return false;
        }

        let Some(intents) = self.intents.upgrade() else {
            warn!("⚠️ Unable to start tracking, the intent channel is closed");
            return false;
        };

        self.subscriptions_started += 1;
        let subscription = SubscriptionId(self.subscriptions_started);
        let events = self.feed.subscribe();
        self.forwarder = Some(tokio::spawn(forward(subscription, events, intents)));
        self.status = TrackingStatus::Active;

        info!(%subscription, "📍 Started tracking");
        true
    }

    /// Drops the feed subscription. Fixes that were already forwarded are still recorded.
    #[instrument(skip_all)]
    pub fn stop(&mut self) -> bool {
        if !self.status.is_active() {
            debug!("📍 Tracking is already stopped");
            return false;
        }

        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
        self.status = TrackingStatus::Idle;

        info!("📍 Stopped tracking");
        true
    }

    /// Turns a fix into a history entry and appends it to the store.
    ///
    /// Returns `Ok(None)` if the fix is ignored: the session is idle and the fix does not come from a
    /// subscription it started. Forwarders are aborted on stop, so a fix carrying an earlier
    /// subscription was queued before that stop and is still recorded. A persist failure still
    /// records the point in memory and hands it back inside the error.
    pub async fn on_fix(&self, subscription: SubscriptionId, fix: RawFix, store: &mut LocationStore) -> Result<Option<LocationPoint>, TrackingError> {
        if !self.status.is_active() && !self.has_started(subscription) {
            debug!(%subscription, "📍 Ignoring fix received while idle");
            return Ok(None);
        }

        if self.validate_coordinates {
            Coordinate::validated(fix.latitude, fix.longitude)?;
        }

        let (accuracy_m, speed_mps) = (fix.accuracy_m, fix.speed_mps);
        let point = fix.into_point(store.calendar());
        match store.append(point.clone()).await {
            Ok(()) => {
                #[rustfmt::skip]
                debug!(%subscription, ?accuracy_m, ?speed_mps, "📍 Recorded point ({}, {}) at {}", point.latitude, point.longitude, point.timestamp);
                Ok(Some(point))
            }
            Err(source) => Err(TrackingError::Persist { point, source }),
        }
    }

    fn has_started(&self, subscription: SubscriptionId) -> bool {
        (1..=self.subscriptions_started).contains(&subscription.0)
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
    }
}

#[instrument(skip(events, intents))]
async fn forward(subscription: SubscriptionId, mut events: FeedSubscription, intents: Sender<Intent>) {
    while let Some(event) = events.next().await {
        let intent = match event {
            FeedEvent::Fix(fix) => Intent::FixReceived { subscription, fix },
            FeedEvent::Error(err) => {
                warn!("⚠️ Location feed reported an error: {}", err);
                Intent::ErrorOccurred(err.to_string())
            }
        };

        if intents.send(intent).await.is_err() {
            debug!("📍 Intent channel closed, no longer forwarding fixes");
            return;
        }
    }
    debug!("📍 Location feed ended");
}

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error(transparent)]
    Validation(#[from] CoordinateError),
    #[error("{source}")]
    Persist { point: LocationPoint, source: StoreError },
}
