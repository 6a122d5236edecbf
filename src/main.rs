use crate::app_config::AppConfig;
use crate::domain::intent::Intent;
use crate::feed::{LocationFeed, ReplayFeed};
use crate::snapshot_listener::snapshot_listener;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::store::LocationStore;
use crate::tracker::Tracker;
use crate::tracking_session::TrackingSession;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::{signal, task};
use tracing::{info, warn};

mod app_config;
mod domain;
mod extensions;
mod feed;
mod reference_zone_deserializer;
mod snapshot_listener;
mod storage;
mod store;
mod tracker;
mod tracking_session;
mod view_state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    #[rustfmt::skip]
    info!(zone = %config.calendar().zone(), day_boundary = ?config.calendar().day_boundary(), "✅  Loaded configuration");

    let storage: Arc<dyn KeyValueStore> = match config.storage().directory() {
        Some(directory) => Arc::new(FileStore::new(directory)),
        None => {
            warn!("⚠️ No storage directory configured, the location history is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let mut store = LocationStore::new(storage, config.storage().key(), *config.calendar());
    if store.load().await.is_err() && store.is_degraded() {
        warn!("⚠️ Location history is degraded, the next recorded point overwrites the stored history");
    }
    info!("✅  Initialized location store");

    let (tx, rx) = mpsc::channel::<Intent>(config.core().intent_buffer_size());
    let feed: Arc<dyn LocationFeed> = Arc::new(ReplayFeed::new(config.feed().replay_file(), config.feed().interval()));
    let session = TrackingSession::new(feed, tx.downgrade(), config.tracking().validate_coordinates());

    let mut tracker = Tracker::new(store, session, rx, &config);
    let notifier_rx = tracker.notifier();
    let listener_tx = tx.downgrade();

    task::spawn(async move {
        snapshot_listener(notifier_rx, listener_tx).await;
    });
    info!("✅  Initialized snapshot listener");

    let tracker_task = task::spawn(async move {
        tracker.listen().await;
    });
    info!("✅  Initialized tracker");

    if config.tracking().start_on_launch() {
        tx.send(Intent::StartTracking).await?;
    }

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    signal::ctrl_c().await?;
    info!("🛑 Shutting down...");
    tx.send(Intent::StopTracking).await?;
    drop(tx);
    tracker_task.await?;
    info!("🛑 Shutting down... OK");

    Ok(())
}
