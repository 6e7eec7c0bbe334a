use super::{slot_for, GapFreeTracker};
use crate::completion_set::CompletionSet;
use crate::error::{TrackerError, TrackerResult};
use crate::wait_strategy::{BlockingWaitStrategy, WaitStrategy};
use crate::TrackerConfig;
use core::sync::atomic::{AtomicI64, Ordering};
use crossbeam_utils::CachePadded;
use tracing::{debug, trace};

/// Tracker that extends the watermark one slot at a time with compare and swap instead of a lock.
///
/// Slot writes and the reads made while scanning are `SeqCst`. Two threads completing adjacent ids
/// at the same time can therefore never both read the other's slot as empty and walk away, which
/// release/acquire alone would allow.
#[derive(Debug)]
pub struct LockFreeTracker<WS = BlockingWaitStrategy> {
    completed: CompletionSet,
    watermark: CachePadded<AtomicI64>,
    wait_strategy: WS,
}

impl LockFreeTracker {
    pub fn new(capacity: usize) -> Self {
        Self::from_config(TrackerConfig::new(capacity))
    }

    pub fn from_config(config: TrackerConfig) -> Self {
        Self::with_wait_strategy(config, Default::default())
    }
}

impl Default for LockFreeTracker {
    fn default() -> Self {
        Self::from_config(TrackerConfig::default())
    }
}

impl<WS> LockFreeTracker<WS>
where
    WS: WaitStrategy,
{
    pub fn with_wait_strategy(config: TrackerConfig, wait_strategy: WS) -> Self {
        Self {
            completed: CompletionSet::new(config.capacity()),
            watermark: CachePadded::new(AtomicI64::new(0)),
            wait_strategy,
        }
    }

    /// Number of distinct ids recorded so far.
    pub fn completed_count(&self) -> usize {
        self.completed.count()
    }

    fn advance(&self) {
        let start = self.watermark.load(Ordering::SeqCst);
        let mut current = start;
        let mut advanced = false;
        // Every slot at or below the watermark is set, so an empty `next` means `current` is the
        // live watermark and not a stale read.
        loop {
            let next = current + 1;
            if !self.completed.contains(next as usize, Ordering::SeqCst) {
                break;
            }
            match self.watermark.compare_exchange_weak(
                current,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    advanced = true;
                    current = next;
                }
                Err(actual) => current = actual,
            }
        }
        if advanced {
            trace!(from = start, to = current, "watermark advanced");
            self.wait_strategy.notify();
        }
    }
}

impl<WS> GapFreeTracker for LockFreeTracker<WS>
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
        if !self.completed.mark(slot, Ordering::SeqCst) {
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
