use crate::app_config::AppConfig;
use crate::domain::intent::Intent;
use crate::store::LocationStore;
use crate::tracking_session::{TrackingError, TrackingSession};
use crate::view_state::{ReduceContext, ViewSnapshot, reduce};
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

/// Owns the history, the tracking session and the current snapshot, and applies intents one at a time.
#[derive(Debug)]
pub struct Tracker {
    store: LocationStore,
    session: TrackingSession,
    snapshot: ViewSnapshot,
    viewport_span_m: f64,
    rx: Receiver<Intent>,
    notifier_tx: WatchSender<ViewSnapshot>,
    notifier_rx: WatchReceiver<ViewSnapshot>,
}

impl Tracker {
    /// Starts out showing today's points in the store's reference zone.
    pub fn new(store: LocationStore, session: TrackingSession, rx: Receiver<Intent>, config: &AppConfig) -> Self {
        let viewport_span_m = config.map().viewport_span_m();
        let today = store.calendar().today();
        let context = ReduceContext::new(&store, session.status(), viewport_span_m);
        let snapshot = reduce(&ViewSnapshot::initial(today), &Intent::DaySelected(today), &context);
        let (notifier_tx, notifier_rx) = watch::channel(snapshot.clone());

        Tracker {
            store,
            session,
            snapshot,
            viewport_span_m,
            rx,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<ViewSnapshot> {
        self.notifier_rx.clone()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    /// Processes intents until every sender is gone.
    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(intent) = self.rx.recv().await {
            self.handle(intent).await;
        }

        self.session.stop();
        info!("🔵 Intent channel closed, {} point(s) recorded", self.store.len());
    }

    pub async fn handle(&mut self, intent: Intent) {
        debug!("🔵 Received intent: {:?}", intent);
        match intent {
            Intent::StartTracking => {
                self.session.start();
                self.apply(&Intent::StartTracking);
            }
            Intent::StopTracking => {
                self.session.stop();
                self.apply(&Intent::StopTracking);
            }
            Intent::FixReceived { subscription, fix } => match self.session.on_fix(subscription, fix, &mut self.store).await {
                Ok(Some(point)) => self.apply(&Intent::PointRecorded(point)),
                Ok(None) => {}
                Err(TrackingError::Persist { point, source }) => {
                    self.apply(&Intent::PointRecorded(point));
                    self.apply(&Intent::ErrorOccurred(source.to_string()));
                }
                Err(err @ TrackingError::Validation(_)) => {
                    warn!("⚠️ Rejected fix: {}", err);
                    self.apply(&Intent::ErrorOccurred(err.to_string()));
                }
            },
            intent => self.apply(&intent),
        }
    }

    fn apply(&mut self, intent: &Intent) {
        let context = ReduceContext::new(&self.store, self.session.status(), self.viewport_span_m);
        let next = reduce(&self.snapshot, intent, &context);
        if next == self.snapshot {
            return;
        }

        debug!(
            day = %next.selected_day,
            points = next.points.len(),
            tracking = %next.tracking,
            "🟢 Updated snapshot"
        );
        self.snapshot = next;
        self.notifier_tx.send_replace(self.snapshot.clone());
    }
}
