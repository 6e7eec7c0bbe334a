use super::{slot_for, GapFreeTracker};
use crate::completion_set::CompletionSet;
use crate::error::{TrackerError, TrackerResult};
use crate::wait_strategy::{BlockingWaitStrategy, WaitStrategy};
use crate::TrackerConfig;
use core::sync::atomic::{AtomicI64, Ordering};
use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Tracker that marks completions lock free and advances the watermark under a mutex.
///
/// Marking a slot is the hot path and never blocks. Only the scan that extends the watermark over
/// newly contiguous slots takes the lock, so concurrent advancers can't lose or double count
/// progress. The lock also orders slot writes: whichever thread takes it last sees every slot
/// marked before the earlier holders released it.
#[derive(Debug)]
pub struct LockedTracker<WS = BlockingWaitStrategy> {
    completed: CompletionSet,
    watermark: CachePadded<AtomicI64>,
    // held only while scanning forward from the watermark
    advance_lock: Mutex<()>,
    wait_strategy: WS,
}

impl LockedTracker {
    pub fn new(capacity: usize) -> Self {
        Self::from_config(TrackerConfig::new(capacity))
    }

    pub fn from_config(config: TrackerConfig) -> Self {
        Self::with_wait_strategy(config, Default::default())
    }
}

impl Default for LockedTracker {
    fn default() -> Self {
        Self::from_config(TrackerConfig::default())
    }
}

impl<WS> LockedTracker<WS>
where
    WS: WaitStrategy,
{
    pub fn with_wait_strategy(config: TrackerConfig, wait_strategy: WS) -> Self {
        Self {
            completed: CompletionSet::new(config.capacity()),
            watermark: CachePadded::new(AtomicI64::new(0)),
            advance_lock: Mutex::new(()),
            wait_strategy,
        }
    }

    /// Number of distinct ids recorded so far.
    pub fn completed_count(&self) -> usize {
        self.completed.count()
    }

    fn advance(&self) {
        let guard = self.advance_lock.lock();
        let start = self.watermark.load(Ordering::Acquire);
        let mut current = start;
        loop {
            let next = self.watermark.load(Ordering::Acquire) + 1;
            if !self.completed.contains(next as usize, Ordering::Acquire) {
                break;
            }
            // the lock orders advancers, release is for the lock free readers
            self.watermark.store(next, Ordering::Release);
            current = next;
        }
        drop(guard);
        if current != start {
            trace!(from = start, to = current, "watermark advanced");
            self.wait_strategy.notify();
        }
    }
}

impl<WS> GapFreeTracker for LockedTracker<WS>
where
    WS: WaitStrategy + Send + Sync,
{
    fn record_completion(&self, id: i64) -> TrackerResult<()> {
        let slot = match slot_for(id, self.completed.len()) {
            Ok(Some(slot)) => slot,
            Ok(None) => return Ok(()),
            Err(err) => {
                debug!(id, capacity = self.completed.len(), "rejected out of range completion");
                return Err(err);
            }
        };
        if !self.completed.mark(slot, Ordering::Release) {
            debug!(id, "duplicate completion");
        }
        self.advance();
        Ok(())
    }

    fn current_watermark(&self) -> i64 {
        self.watermark.load(Ordering::Acquire)
    }

    fn wait_for_watermark(&self, target: i64) -> TrackerResult<i64> {
        if target <= 0 {
            return Ok(self.current_watermark());
        }
        if target as u64 >= self.completed.len() as u64 {
            return Err(TrackerError::OutOfRange {
                id: target,
                capacity: self.completed.len(),
            });
        }
        Ok(self.wait_strategy.wait_for(&self.watermark, target))
    }

    fn is_completed(&self, id: i64) -> bool {
        match slot_for(id, self.completed.len()) {
            Ok(Some(slot)) => self.completed.contains(slot, Ordering::Acquire),
            _ => false,
        }
    }

    fn capacity(&self) -> usize {
        self.completed.len()
    }
}
