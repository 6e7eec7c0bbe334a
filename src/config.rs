/// Construction parameters for a tracker.
///
/// `capacity` is the exclusive upper bound of the id domain. Ids `1..capacity` can be recorded,
/// so the watermark never goes above `capacity - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    capacity: usize,
}

impl TrackerConfig {
    pub const DEFAULT_CAPACITY: usize = 1_000_000;

    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}
