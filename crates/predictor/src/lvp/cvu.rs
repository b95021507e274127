//! Confidence Verification Unit (CVU).
//!
//! The CVU keeps a short direct-mapped window of recent verification
//! outcomes per address tag. When two loads alias into the same LCT/LVPT
//! slot but resolve differently, the raw correctness signal oscillates;
//! the CVU damps that oscillation by confirming a correct outcome only
//! when the previous outcome recorded for the tag was also correct, so the
//! classification counter decays toward not-predict instead of flapping.

use tracing::trace;

/// An entry in the verification window.
#[derive(Clone, Copy, Debug, Default)]
struct CvuEntry {
    /// Outcome of the most recent verification recorded at this slot.
    last_correct: bool,
    /// Indicates if this slot holds a recorded outcome.
    valid: bool,
}

/// Confidence Verification Unit structure.
#[derive(Debug)]
pub struct Cvu {
    /// The window of per-tag outcomes.
    table: Vec<CvuEntry>,
}

impl Cvu {
    /// Creates a new CVU with the specified number of window entries.
    pub fn new(size: usize) -> Self {
        trace!(target: "lvp", size, "created CVU");
        Self {
            table: vec![CvuEntry::default(); size],
        }
    }

    /// Calculates the index into the window for a given tag.
    ///
    /// The window is small and not required to be a power of two, so this
    /// uses a modulo rather than a mask. No tag is stored: distinct tags
    /// sharing a slot are accepted noise.
    fn index(&self, tag: u64) -> usize {
        (tag % self.table.len() as u64) as usize
    }

    /// Corroborates a prediction outcome for the given tag.
    ///
    /// The raw outcome is `predicted == actual`. The corroborated result
    /// additionally requires the previous outcome recorded at the tag's
    /// slot to have been correct (an empty slot confirms). The raw outcome
    /// is then recorded, so an incorrect verification always returns
    /// `false` and also suppresses the next confirmation at the same slot.
    pub fn verify(&mut self, tag: u64, predicted: u64, actual: u64) -> bool {
        let idx = self.index(tag);
        let raw = predicted == actual;
        let entry = self.table[idx];
        let corroborated = raw && (!entry.valid || entry.last_correct);

        self.table[idx] = CvuEntry {
            last_correct: raw,
            valid: true,
        };

        trace!(target: "lvp", tag, idx, raw, corroborated, "verified prediction outcome");
        corroborated
    }

    /// Clears the verification history recorded for the given tag.
    ///
    /// Used when the memory state behind a tag is known to have changed
    /// (a store overwrote the loaded location) and the recorded outcome no
    /// longer corroborates anything.
    pub fn invalidate(&mut self, tag: u64) {
        let idx = self.index(tag);
        self.table[idx] = CvuEntry::default();
    }
}
