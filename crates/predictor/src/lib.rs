//! Load value prediction engine.
//!
//! This crate implements a load value predictor for cycle-accurate CPU
//! simulators with the following:
//! 1. **Tables:** Load Value Prediction Table (LVPT), Load Classification
//!    Table (LCT), and Confidence Verification Unit (CVU).
//! 2. **Engine:** Fetch-time classification and speculation, commit-time
//!    verification and training, squash support for pipeline flushes.
//! 3. **Configuration:** Validated table geometry, deserializable from JSON.
//! 4. **Statistics:** Read-only prediction counters and derived rates.
//!
//! The predictor is a pure table machine: it owns no memory system and
//! raises no errors after construction. Misprediction is a normal outcome
//! reported to the caller, and recovery (squash/replay) belongs to the
//! embedding pipeline.

/// Predictor configuration (defaults, enums, validation).
pub mod config;
/// Construction-time error types.
pub mod error;
/// Load value prediction unit (LVPT, LCT, CVU, engine).
pub mod lvp;
/// Prediction statistics collection.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Configuration validation failure; fatal to predictor construction.
pub use crate::error::ConfigError;
/// Main predictor type; owns the LVPT, LCT, and CVU.
pub use crate::lvp::LoadValuePredictor;
