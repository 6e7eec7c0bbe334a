//! Tracks the highest transaction id below which every id has completed.
//!
//! Transactions finish out of order across many threads. The tracker answers "up to which id is
//! everything done?" cheaply and at any time. Ids are dense integers in `1..capacity`, capacity is
//! fixed when the tracker is built.
//!
//! ```
//!# use gapfree::{tracker, GapFreeTracker};
//!let tracker = tracker(16);
//!for id in [1, 4, 2] {
//!    tracker.record_completion(id).expect("id in range");
//!}
//!assert_eq!(tracker.current_watermark(), 2);
//! ```

mod completion_set;
mod config;
mod error;
pub mod tracker;
pub mod wait_strategy;

pub use config::TrackerConfig;
pub use error::{TrackerError, TrackerResult};
pub use tracker::{GapFreeTracker, LockFreeTracker, LockedTracker};
pub use wait_strategy::WaitStrategy;

use wait_strategy::{BlockingWaitStrategy, BusySpinWaitStrategy};

/// Creates a tracker accepting ids in `1..capacity`. Waiters block until the watermark moves.
pub fn tracker(capacity: usize) -> LockedTracker<BlockingWaitStrategy> {
    tracker_with(TrackerConfig::new(capacity), BlockingWaitStrategy::default())
}

/// Like [`tracker`] but waiters spin instead of blocking.
pub fn busy_tracker(capacity: usize) -> LockedTracker<BusySpinWaitStrategy> {
    tracker_with(TrackerConfig::new(capacity), Default::default())
}

pub fn tracker_with<WS>(config: TrackerConfig, wait_strategy: WS) -> LockedTracker<WS>
where
    WS: WaitStrategy,
{
    LockedTracker::with_wait_strategy(config, wait_strategy)
}
