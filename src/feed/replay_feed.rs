use crate::domain::RawFix;
use crate::feed::{FeedError, FeedEvent, FeedSubscription, LocationFeed};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::sync::mpsc;
use tokio::sync::mpsc::Sender;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, instrument, warn};

/// Plays back fixes from a JSON file, one per interval.
#[derive(Debug)]
pub struct ReplayFeed {
    path: PathBuf,
    interval: Duration,
}

#[derive(Debug, Deserialize)]
struct ReplayRecord {
    latitude: f64,
    longitude: f64,
    timestamp: Option<DateTime<Utc>>,
    accuracy_m: Option<f64>,
    speed_mps: Option<f64>,
    title: Option<String>,
    subtitle: Option<String>,
}

impl ReplayRecord {
    fn into_fix(self, now: DateTime<Utc>) -> RawFix {
        RawFix {
            accuracy_m: self.accuracy_m,
            speed_mps: self.speed_mps,
            title: self.title,
            subtitle: self.subtitle,
            ..RawFix::new(self.latitude, self.longitude, self.timestamp.unwrap_or(now))
        }
    }
}

impl ReplayFeed {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        ReplayFeed {
            path: path.into(),
            interval,
        }
    }
}

impl LocationFeed for ReplayFeed {
    fn subscribe(&self) -> FeedSubscription {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(replay(self.path.clone(), self.interval, tx));
        FeedSubscription::new(ReceiverStream::new(rx))
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
async fn replay(path: PathBuf, interval: Duration, tx: Sender<FeedEvent>) {
    if interval.is_zero() {
        let err = FeedError::Unavailable("the replay interval must be greater than zero".to_string());
        warn!("⚠️ Unable to replay fixes: {}", err);
        tx.send(FeedEvent::Error(err)).await.unwrap_or_default();
        return;
    }

    let records = match read_records(&path).await {
        Ok(records) => records,
        Err(err) => {
            warn!("⚠️ Unable to replay fixes: {}", err);
            tx.send(FeedEvent::Error(err)).await.unwrap_or_default();
            return;
        }
    };

    info!("🛰️ Replaying {} fix(es) every {:?}...", records.len(), interval);
    let mut ticker = tokio::time::interval(interval);
    for record in records {
        ticker.tick().await;
        if tx.send(FeedEvent::Fix(record.into_fix(Utc::now()))).await.is_err() {
            debug!("🛰️ Replaying fixes... stopped, unsubscribed");
            return;
        }
    }
    info!("🛰️ Replaying fixes... OK");
}

async fn read_records(path: &Path) -> Result<Vec<ReplayRecord>, FeedError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FeedError::Unavailable(format!("cannot read '{}': {}", path.display(), e)))?;

    serde_json::from_str(&content).map_err(|e| FeedError::Unavailable(format!("cannot parse '{}': {}", path.display(), e)))
}
