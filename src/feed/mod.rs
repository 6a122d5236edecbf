mod location_feed;
mod replay_feed;

pub use location_feed::{FeedError, FeedEvent, FeedSubscription, LocationFeed};
pub use replay_feed::ReplayFeed;
