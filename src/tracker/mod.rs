//! Gap free watermark trackers.
//!
//! A tracker takes completion notifications for transaction ids in any order, from any number of
//! threads, and reports the highest id `W` such that every id in `1..=W` has completed.
//!
//! Two implementations are provided. [`LockedTracker`] publishes completions lock free and
//! serialises watermark advancement behind a mutex. [`LockFreeTracker`] extends the watermark
//! with a compare and swap loop instead. Both give the same guarantees.

mod lock_free;
mod locked;

pub use lock_free::LockFreeTracker;
pub use locked::LockedTracker;

use crate::error::{TrackerError, TrackerResult};

pub trait GapFreeTracker: Send + Sync {
    /// Marks `id` as completed and advances the watermark as far as the completed prefix allows.
    ///
    /// Ids `<= 0` are ignored. Ids `>= capacity` fail with [`TrackerError::OutOfRange`] and leave
    /// the tracker untouched. Recording an id more than once is harmless.
    ///
    /// # Examples
    ///
    /// ```
    ///# use gapfree::{tracker, GapFreeTracker};
    ///let tracker = tracker(100);
    ///tracker.record_completion(2).expect("in range");
    ///assert_eq!(tracker.current_watermark(), 0);
    ///tracker.record_completion(1).expect("in range");
    ///assert_eq!(tracker.current_watermark(), 2);
    /// ```
    fn record_completion(&self, id: i64) -> TrackerResult<()>;

    /// The highest gap free id. Never blocks and never goes backwards.
    fn current_watermark(&self) -> i64;

    /// Blocks until the watermark is at least `target` and returns the watermark that satisfied
    /// the wait.
    ///
    /// A `target` the watermark can never reach (`>= capacity`) fails with
    /// [`TrackerError::OutOfRange`] rather than waiting forever.
    fn wait_for_watermark(&self, target: i64) -> TrackerResult<i64>;

    /// Whether `id` has been recorded. Always false outside `1..capacity`.
    fn is_completed(&self, id: i64) -> bool;

    /// Exclusive upper bound of the ids this tracker accepts.
    fn capacity(&self) -> usize;
}

/// Maps an id to its completion slot. `Ok(None)` means the id is outside the domain and should be
/// ignored.
#[inline(always)]
pub(crate) fn slot_for(id: i64, capacity: usize) -> TrackerResult<Option<usize>> {
    if id <= 0 {
        return Ok(None);
    }
    if id as u64 >= capacity as u64 {
        return Err(TrackerError::OutOfRange { id, capacity });
    }
    Ok(Some(id as usize))
}
