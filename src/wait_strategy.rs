//! Ways for a caller of `wait_for_watermark` to pass the time until the watermark catches up.

use core::sync::atomic::{AtomicI64, Ordering};
use event_listener::Event;

#[inline(always)]
fn reached(watermark: &AtomicI64, target: i64) -> Option<i64> {
    let current = watermark.load(Ordering::Acquire);
    (current >= target).then_some(current)
}

pub trait WaitStrategy {
    /// Returns once `watermark >= target`, with the value that satisfied the wait.
    fn wait_for(&self, watermark: &AtomicI64, target: i64) -> i64;

    /// Called by the tracker every time the watermark moves forward.
    fn notify(&self) {}
}

/// Spins on the watermark. Lowest wake up latency, burns a core while waiting.
#[derive(Debug, Clone, Default)]
pub struct BusySpinWaitStrategy {}

impl WaitStrategy for BusySpinWaitStrategy {
    fn wait_for(&self, watermark: &AtomicI64, target: i64) -> i64 {
        loop {
            if let Some(current) = reached(watermark, target) {
                return current;
            }
            core::hint::spin_loop();
        }
    }
}

/// Spins briefly, then parks on an event that the tracker fires after each advance.
#[derive(Debug)]
pub struct BlockingWaitStrategy {
    advanced: Event,
    spins: u32,
}

impl BlockingWaitStrategy {
    const DEFAULT_SPINS: u32 = 64;

    /// `spins` checks are made before the waiter parks. Zero parks straight away.
    pub fn new(spins: u32) -> Self {
        Self {
            advanced: Event::new(),
            spins,
        }
    }
}

impl Default for BlockingWaitStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPINS)
    }
}

impl WaitStrategy for BlockingWaitStrategy {
    fn wait_for(&self, watermark: &AtomicI64, target: i64) -> i64 {
        for _ in 0..self.spins {
            if let Some(current) = reached(watermark, target) {
                return current;
            }
            core::hint::spin_loop();
        }
        loop {
            // register before the re-check so an advance between the two still wakes us
            let listener = self.advanced.listen();
            if let Some(current) = reached(watermark, target) {
                return current;
            }
            listener.wait();
        }
    }

    fn notify(&self) {
        self.advanced.notify(usize::MAX);
    }
}
