//! Load value prediction unit (LVP).
//!
//! This module contains the prediction tables and the engine that
//! orchestrates them: the Load Value Prediction Table (LVPT) holding last
//! observed values, the Load Classification Table (LCT) deciding which
//! loads are worth speculating on, and the Confidence Verification Unit
//! (CVU) corroborating raw prediction outcomes.

pub use self::predictor::{LoadPrediction, LoadValuePredictor, Resolution};

/// Confidence Verification Unit damping noisy prediction outcomes.
pub mod cvu;

/// Load Classification Table of saturating confidence counters.
pub mod lct;

/// Load Value Prediction Table of last observed values.
pub mod lvpt;

/// Predictor engine orchestrating LVPT, LCT, and CVU.
pub mod predictor;

use self::cvu::Cvu;
use crate::config::{Config, CvuMode};

/// Enum wrapper for static dispatch of the configured verification mode.
/// This avoids a trait object in the per-load resolution path.
#[derive(Debug)]
pub enum CvuUnit {
    /// Corroborating window of per-tag outcomes.
    Corroborating(Cvu),
    /// No-op verification: the raw outcome passes through unchanged.
    Passthrough,
}

impl CvuUnit {
    /// Creates the verification unit selected by the configuration.
    pub fn new(config: &Config) -> Self {
        match config.cvu.mode {
            CvuMode::Corroborating => Self::Corroborating(Cvu::new(config.cvu.size)),
            CvuMode::Passthrough => Self::Passthrough,
        }
    }

    /// Corroborates a raw prediction outcome for the given tag.
    ///
    /// In pass-through mode this is exactly `predicted == actual`.
    #[inline]
    pub fn verify(&mut self, tag: u64, predicted: u64, actual: u64) -> bool {
        match self {
            Self::Corroborating(cvu) => cvu.verify(tag, predicted, actual),
            Self::Passthrough => predicted == actual,
        }
    }

    /// Clears any verification history recorded for the given tag.
    pub fn invalidate(&mut self, tag: u64) {
        if let Self::Corroborating(cvu) = self {
            cvu.invalidate(tag);
        }
    }
}
