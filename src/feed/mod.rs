/// Infinite-scroll recommendation feed
///
/// The feed is split into three pieces:
/// - `paginator`: the pure state machine holding the accumulated items,
///   page cursor and phase. All transitions go through explicit methods;
///   there is exactly one authoritative state record.
/// - `engine`: the async task that owns a `Paginator`, drives fetches
///   through a `RecommendationSource` and publishes snapshots on a watch
///   channel. At most one fetch is in flight at a time.
/// - `trigger`: the edge-triggered sentinel visibility source that turns
///   "last row scrolled into view" events into load-more requests.
pub mod engine;
pub mod paginator;
pub mod trigger;

pub use engine::RecommendationFeed;
pub use paginator::{
    FeedError, FeedPhase, FeedSnapshot, FetchPlan, IdentityChange, PageCursor, Paginator,
};
pub use trigger::{SentinelId, SentinelTrigger};
