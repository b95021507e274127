//! Load Value Prediction Table (LVPT).
//!
//! The LVPT is a direct-mapped table storing the most recently observed
//! value for each load slot. Unlike a cache it stores no tags: two loads
//! that map to the same slot silently share it, and the resulting wrong
//! predictions are corrected by the classification/verification loop
//! rather than avoided structurally.

use tracing::trace;

/// An entry in the Load Value Prediction Table.
#[derive(Clone, Copy, Debug, Default)]
struct LvptEntry {
    /// The last value observed for loads mapping to this slot.
    value: u64,
    /// Indicates if this slot has been written since construction.
    valid: bool,
}

/// Load Value Prediction Table structure.
#[derive(Debug)]
pub struct Lvpt {
    /// The table of value entries.
    table: Vec<LvptEntry>,
    /// Bit mask for obtaining table indexes.
    index_mask: u64,
    /// Amount to shift instruction addresses by for indexing.
    shift: u32,
}

impl Lvpt {
    /// Creates a new LVPT with the specified geometry.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries. Must be a power of two (enforced
    ///   by [`Config::validate`](crate::config::Config::validate)).
    /// * `shift` - Instruction address shift applied before masking.
    pub fn new(size: usize, shift: u32) -> Self {
        Self {
            table: vec![LvptEntry::default(); size],
            index_mask: size as u64 - 1,
            shift,
        }
    }

    /// Calculates the index into the table for a given program counter.
    fn index(&self, pc: u64) -> usize {
        ((pc >> self.shift) & self.index_mask) as usize
    }

    /// Looks up the stored value for the given program counter.
    ///
    /// Returns `None` until the slot has been written for the first time.
    /// Repeated lookups with no intervening [`record`](Self::record) always
    /// return the same result.
    pub fn lookup(&self, pc: u64) -> Option<u64> {
        let e = self.table[self.index(pc)];
        if e.valid { Some(e.value) } else { None }
    }

    /// Records the architecturally correct value for a resolved load.
    ///
    /// Unconditionally overwrites the slot; there is no eviction policy
    /// beyond overwrite.
    pub fn record(&mut self, pc: u64, value: u64) {
        let idx = self.index(pc);
        trace!(target: "lvp", pc, idx, value, "recording resolved load value");
        self.table[idx] = LvptEntry { value, valid: true };
    }
}
