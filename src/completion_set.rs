//! Fixed size concurrent set of completion flags.
//!
//! One bit per slot packed into `AtomicU64` words. Bits are only ever set, never cleared, so a
//! slot that reads as complete stays complete for the lifetime of the set.

use core::sync::atomic::{AtomicU64, Ordering};

const BITS_PER_WORD: usize = u64::BITS as usize;

#[derive(Debug)]
pub(crate) struct CompletionSet {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl CompletionSet {
    pub(crate) fn new(len: usize) -> Self {
        let num_words = len.div_ceil(BITS_PER_WORD);
        let words = (0..num_words).map(|_| AtomicU64::new(0)).collect();
        Self { words, len }
    }

    #[inline(always)]
    fn locate(slot: usize) -> (usize, u64) {
        (slot / BITS_PER_WORD, 1 << (slot % BITS_PER_WORD))
    }

    /// Sets the flag for `slot`. Returns true if this call was the one that set it.
    ///
    /// `order` must be `Release` or stronger so that a later scan can observe the write.
    #[inline(always)]
    pub(crate) fn mark(&self, slot: usize, order: Ordering) -> bool {
        debug_assert!(slot < self.len);
        let (word, mask) = Self::locate(slot);
        let previous = self.words[word].fetch_or(mask, order);
        previous & mask == 0
    }

    /// Slots past the end of the set are never complete.
    #[inline(always)]
    pub(crate) fn contains(&self, slot: usize, order: Ordering) -> bool {
        if slot >= self.len {
            return false;
        }
        let (word, mask) = Self::locate(slot);
        self.words[word].load(order) & mask != 0
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of set flags. Only a snapshot while other threads are marking.
    pub(crate) fn count(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }
}
