//! Configuration system for the load value predictor.
//!
//! This module defines the configuration structures used to parameterize a
//! predictor instance. It provides:
//! 1. **Defaults:** Baseline table geometry (LVPT, LCT, CVU).
//! 2. **Structures:** Config for the predictor and its attached CVU.
//! 3. **Validation:** Construction-time rejection of unusable geometry.
//!
//! Configuration is supplied as JSON by an embedding simulator or use
//! `Config::default()` for the standard geometry.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration constants for the predictor.
///
/// These values define the baseline table geometry when not explicitly
/// overridden by the embedding simulator.
mod defaults {
    /// Default number of entries in the Load Value Prediction Table.
    pub const LVPT_SIZE: usize = 1024;

    /// Default number of entries in the Load Classification Table.
    pub const LCT_SIZE: usize = 256;

    /// Default number of bits per Load Classification Table counter.
    pub const LCT_BITS: u32 = 2;

    /// Default number of bits to shift instruction addresses by for
    /// table indexing.
    ///
    /// Two bits, matching the 4-byte instruction alignment the branch
    /// prediction tables conventionally assume.
    pub const INST_SHIFT_AMT: u32 = 2;

    /// Default number of entries in the Confidence Verification Unit.
    pub const CVU_SIZE: usize = 16;
}

/// Confidence verification modes.
///
/// Selects how raw prediction outcomes are corroborated before they train
/// the classification counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CvuMode {
    /// Damping window of recent per-tag outcomes.
    ///
    /// A correct outcome is confirmed only when the previous outcome
    /// recorded for the tag's slot was also correct, which suppresses
    /// confidence flapping when aliasing loads disagree.
    #[default]
    Corroborating,

    /// No corroboration; the raw outcome passes through unchanged.
    Passthrough,
}

/// Root configuration structure for a predictor instance.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use lvp_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.lvpt_size, 1024);
/// assert_eq!(config.lct_bits, 2);
/// ```
///
/// Deserializing from JSON (typical embedding usage), with unspecified
/// fields falling back to their defaults:
///
/// ```
/// use lvp_core::config::{Config, CvuMode};
///
/// let json = r#"{
///     "lvpt_size": 2048,
///     "lct_size": 512,
///     "cvu": { "mode": "Passthrough" }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.lvpt_size, 2048);
/// assert_eq!(config.cvu.mode, CvuMode::Passthrough);
/// assert_eq!(config.cvu.size, 16);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Number of entries in the Load Value Prediction Table.
    #[serde(default = "Config::default_lvpt_size")]
    pub lvpt_size: usize,

    /// Number of entries in the Load Classification Table.
    #[serde(default = "Config::default_lct_size")]
    pub lct_size: usize,

    /// Number of bits per Load Classification Table counter.
    #[serde(default = "Config::default_lct_bits")]
    pub lct_bits: u32,

    /// Number of bits to shift instruction addresses by for indexing.
    #[serde(default = "Config::default_inst_shift_amt")]
    pub inst_shift_amt: u32,

    /// Confidence Verification Unit attached to this predictor.
    #[serde(default)]
    pub cvu: CvuConfig,
}

impl Config {
    /// Returns the default Load Value Prediction Table size.
    fn default_lvpt_size() -> usize {
        defaults::LVPT_SIZE
    }

    /// Returns the default Load Classification Table size.
    fn default_lct_size() -> usize {
        defaults::LCT_SIZE
    }

    /// Returns the default classification counter width.
    fn default_lct_bits() -> u32 {
        defaults::LCT_BITS
    }

    /// Returns the default instruction address shift.
    fn default_inst_shift_amt() -> u32 {
        defaults::INST_SHIFT_AMT
    }

    /// Checks that the configuration describes usable table geometry.
    ///
    /// A shift of zero is legal: it simply indexes on unshifted addresses.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroSize`] when any table has zero entries.
    /// - [`ConfigError::NotPowerOfTwo`] when `lvpt_size` or `lct_size`
    ///   cannot be mask-indexed.
    /// - [`ConfigError::CounterWidth`] when `lct_bits` is 0 or above 8.
    /// - [`ConfigError::ShiftTooLarge`] when `inst_shift_amt` is 64 or more.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lvpt_size == 0 {
            return Err(ConfigError::ZeroSize { param: "lvpt_size" });
        }
        if !self.lvpt_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                param: "lvpt_size",
                value: self.lvpt_size,
            });
        }
        if self.lct_size == 0 {
            return Err(ConfigError::ZeroSize { param: "lct_size" });
        }
        if !self.lct_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                param: "lct_size",
                value: self.lct_size,
            });
        }
        if self.lct_bits == 0 || self.lct_bits > 8 {
            return Err(ConfigError::CounterWidth {
                bits: self.lct_bits,
            });
        }
        if self.inst_shift_amt >= 64 {
            return Err(ConfigError::ShiftTooLarge {
                shift: self.inst_shift_amt,
            });
        }
        if self.cvu.size == 0 {
            return Err(ConfigError::ZeroSize { param: "cvu.size" });
        }
        Ok(())
    }
}

impl Default for Config {
    /// Creates the standard predictor geometry.
    fn default() -> Self {
        Self {
            lvpt_size: defaults::LVPT_SIZE,
            lct_size: defaults::LCT_SIZE,
            lct_bits: defaults::LCT_BITS,
            inst_shift_amt: defaults::INST_SHIFT_AMT,
            cvu: CvuConfig::default(),
        }
    }
}

/// Confidence Verification Unit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CvuConfig {
    /// Verification mode.
    #[serde(default)]
    pub mode: CvuMode,

    /// Number of entries in the verification window.
    #[serde(default = "CvuConfig::default_size")]
    pub size: usize,
}

impl CvuConfig {
    /// Returns the default verification window size.
    fn default_size() -> usize {
        defaults::CVU_SIZE
    }
}

impl Default for CvuConfig {
    /// Creates the standard corroborating window.
    fn default() -> Self {
        Self {
            mode: CvuMode::default(),
            size: defaults::CVU_SIZE,
        }
    }
}
