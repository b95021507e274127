//! Configuration error types.
//!
//! Invalid table geometry is the only failure mode in this crate. Lookup
//! misses and mispredictions are ordinary results carried in return values,
//! so every error defined here is fatal to predictor construction and none
//! can occur afterwards.

use thiserror::Error;

/// Reasons a predictor configuration is rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A table was configured with zero entries.
    ///
    /// Zero-sized tables make the index computation meaningless, so they
    /// are rejected up front rather than defined away.
    #[error("{param} must be non-zero")]
    ZeroSize {
        /// Name of the offending configuration field.
        param: &'static str,
    },

    /// A mask-indexed table size is not a power of two.
    ///
    /// The LVPT and LCT derive their index by masking the shifted
    /// instruction address, which only covers the table when the entry
    /// count is a power of two.
    #[error("{param} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending configuration field.
        param: &'static str,
        /// The rejected entry count.
        value: usize,
    },

    /// The classification counter width does not fit its 8-bit storage.
    #[error("lct_bits must be between 1 and 8, got {bits}")]
    CounterWidth {
        /// The rejected width.
        bits: u32,
    },

    /// The index shift would discard the entire instruction address.
    #[error("inst_shift_amt must be below 64, got {shift}")]
    ShiftTooLarge {
        /// The rejected shift amount.
        shift: u32,
    },
}
