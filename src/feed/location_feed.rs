use crate::domain::RawFix;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    Fix(RawFix),
    Error(FeedError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("location feed is unavailable: {0}")]
    Unavailable(String),
}

/// A live subscription to a location feed. Dropping it unsubscribes.
pub struct FeedSubscription {
    events: BoxStream<'static, FeedEvent>,
}

impl FeedSubscription {
    pub fn new(events: impl Stream<Item = FeedEvent> + Send + 'static) -> Self {
        FeedSubscription { events: events.boxed() }
    }

    pub async fn next(&mut self) -> Option<FeedEvent> {
        self.events.next().await
    }
}

impl Debug for FeedSubscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSubscription").finish_non_exhaustive()
    }
}

/// A source of position fixes, such as a GPS receiver or a recorded track.
pub trait LocationFeed: Debug + Send + Sync {
    fn subscribe(&self) -> FeedSubscription;
}
