//! Prediction statistics collection.
//!
//! This module tracks activity counters for the load value predictor. It
//! provides:
//! 1. **Table traffic:** Fetch-time lookups and LVPT hits.
//! 2. **Speculation:** Predictions issued, correct predictions, and
//!    mispredictions.
//! 3. **Lifecycle:** Resolutions applied and in-flight records discarded.
//!
//! The counters are exposed read-only; the embedding simulator's
//! instrumentation layers its own reporting on top of them.

/// Prediction statistics structure tracking predictor activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LvpStats {
    /// Total fetch-time lookups.
    pub lookups: u64,
    /// Lookups whose LVPT slot held a value.
    pub lvpt_hits: u64,
    /// Speculative values issued to the pipeline.
    pub predictions: u64,
    /// Issued speculations that matched the resolved value.
    pub correct: u64,
    /// Issued speculations that did not match the resolved value.
    pub mispredictions: u64,
    /// Resolution events applied to the tables.
    pub resolutions: u64,
    /// In-flight records discarded by squashes or staleness.
    pub squashed: u64,
}

impl LvpStats {
    /// Fraction of issued speculations that resolved correct, in `[0, 1]`.
    ///
    /// Returns 0.0 before any speculation has been graded.
    pub fn accuracy(&self) -> f64 {
        let graded = self.correct + self.mispredictions;
        if graded == 0 {
            0.0
        } else {
            self.correct as f64 / graded as f64
        }
    }

    /// Fraction of lookups whose LVPT slot held a value, in `[0, 1]`.
    ///
    /// Returns 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.lvpt_hits as f64 / self.lookups as f64
        }
    }

    /// Prints the counters to stdout in the simulator stats format.
    pub fn print(&self) {
        println!("LOAD VALUE PREDICTION");
        println!("  lvp.lookups            {}", self.lookups);
        println!(
            "  lvp.lvpt_hits          {} ({:.2}%)",
            self.lvpt_hits,
            self.hit_rate() * 100.0
        );
        println!("  lvp.predictions        {}", self.predictions);
        println!("  lvp.mispredicts        {}", self.mispredictions);
        println!("  lvp.accuracy           {:.2}%", self.accuracy() * 100.0);
        println!("  lvp.resolutions        {}", self.resolutions);
        println!("  lvp.squashed           {}", self.squashed);
    }
}
