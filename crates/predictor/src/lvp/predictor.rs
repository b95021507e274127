//! Load value predictor engine.
//!
//! The engine owns one LVPT, one LCT, and one CVU, constructed together
//! from a validated configuration. Each load moves through fetch-time
//! classification and commit-time training:
//! 1. **Predict:** the LCT classifies the load; if it is worth speculating
//!    on, the LVPT supplies the value last observed for its slot.
//! 2. **Resolve:** the architecturally correct value arrives; the CVU
//!    corroborates the raw outcome, the LCT trains on the corroborated
//!    signal, and the LVPT is refreshed with the actual value.
//! 3. **Squash:** a pipeline flush discards in-flight records; the flushed
//!    loads simply never resolve.
//!
//! The embedding pipeline must eventually resolve or squash every fetched
//! load; in-flight records are held until one of the two happens.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::CvuUnit;
use super::lct::{Lct, LoadClass};
use super::lvpt::Lvpt;
use crate::config::Config;
use crate::error::ConfigError;
use crate::stats::LvpStats;

/// Speculation issued for a fetched load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadPrediction {
    /// Speculative value to forward, or `None` when the load was
    /// classified unpredictable or its LVPT slot has never been written.
    pub value: Option<u64>,
    /// True when the classification counter is fully saturated and the
    /// load looks constant.
    pub constant: bool,
}

/// Outcome reported for a resolved load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// True when a speculative value had been issued for this load.
    pub predicted: bool,
    /// Comparison of the speculative value against the actual value;
    /// `None` when no speculation was issued.
    pub correct: Option<bool>,
}

/// A fetched load awaiting resolution.
#[derive(Clone, Copy, Debug)]
struct InFlight {
    /// Program counter of the load.
    pc: u64,
    /// Value held by the load's LVPT slot at fetch time, if any.
    fetched_value: Option<u64>,
    /// Whether that value was actually issued as a speculation.
    issued: bool,
}

/// Load value predictor engine structure.
#[derive(Debug)]
pub struct LoadValuePredictor {
    /// Load Value Prediction Table.
    lvpt: Lvpt,
    /// Load Classification Table.
    lct: Lct,
    /// Confidence Verification Unit (or pass-through).
    cvu: CvuUnit,
    /// Amount to shift instruction addresses by for CVU tags.
    shift: u32,
    /// Loads fetched but not yet resolved, in program order.
    in_flight: VecDeque<InFlight>,
    /// Prediction counters.
    stats: LvpStats,
}

impl LoadValuePredictor {
    /// Creates a new predictor from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration describes unusable
    /// table geometry (see [`Config::validate`]).
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            target: "lvp",
            lvpt_size = config.lvpt_size,
            lct_size = config.lct_size,
            lct_bits = config.lct_bits,
            "created load value predictor"
        );
        Ok(Self {
            lvpt: Lvpt::new(config.lvpt_size, config.inst_shift_amt),
            lct: Lct::new(config.lct_size, config.lct_bits, config.inst_shift_amt),
            cvu: CvuUnit::new(config),
            shift: config.inst_shift_amt,
            in_flight: VecDeque::new(),
            stats: LvpStats::default(),
        })
    }

    /// Classifies a fetched load and issues a speculative value if
    /// warranted.
    ///
    /// A predict classification over an unwritten LVPT slot downgrades to
    /// a plain miss for this instance; the slot gets populated once the
    /// load resolves. Either way the load is recorded as in flight until
    /// [`resolve`](Self::resolve) is called for it or the record is
    /// discarded by [`squash`](Self::squash).
    pub fn predict(&mut self, pc: u64) -> LoadPrediction {
        let class = self.lct.classify(pc);
        let fetched_value = self.lvpt.lookup(pc);

        self.stats.lookups += 1;
        if fetched_value.is_some() {
            self.stats.lvpt_hits += 1;
        }

        let issued = class.is_predict() && fetched_value.is_some();
        if issued {
            self.stats.predictions += 1;
        }
        trace!(target: "lvp", pc, ?class, issued, "classified fetched load");

        self.in_flight.push_back(InFlight {
            pc,
            fetched_value,
            issued,
        });

        LoadPrediction {
            value: if issued { fetched_value } else { None },
            constant: issued && class == LoadClass::ConstPredict,
        }
    }

    /// Applies the architecturally correct value for the oldest in-flight
    /// load at `pc` and trains the tables.
    ///
    /// Resolutions must arrive in program order; records in front of the
    /// matching one belong to flushed loads and are dropped as stale. A
    /// resolution with no matching in-flight record updates nothing.
    pub fn resolve(&mut self, pc: u64, actual: u64) -> Resolution {
        let Some(record) = self.take_in_flight(pc) else {
            trace!(target: "lvp", pc, "resolution for untracked load ignored");
            return Resolution {
                predicted: false,
                correct: None,
            };
        };

        self.stats.resolutions += 1;
        let mut correct = None;

        if let Some(fetched) = record.fetched_value {
            let raw = fetched == actual;
            let corroborated = if record.issued {
                correct = Some(raw);
                if raw {
                    self.stats.correct += 1;
                } else {
                    self.stats.mispredictions += 1;
                }
                self.cvu.verify(pc >> self.shift, fetched, actual)
            } else {
                // No speculation was issued: grade the stored value anyway
                // so the classification counter can climb toward
                // predicting.
                raw
            };
            self.lct.update(pc, corroborated);
        }

        self.lvpt.record(pc, actual);

        Resolution {
            predicted: record.issued,
            correct,
        }
    }

    /// Discards every in-flight record.
    ///
    /// Called on a pipeline flush; the flushed loads never resolve and no
    /// table is trained for them.
    pub fn squash(&mut self) {
        self.stats.squashed += self.in_flight.len() as u64;
        self.in_flight.clear();
    }

    /// Clears the verification history recorded for the given load.
    ///
    /// Used when the memory backing the load is known to have changed and
    /// the CVU window entry no longer corroborates anything.
    pub fn invalidate(&mut self, pc: u64) {
        self.cvu.invalidate(pc >> self.shift);
    }

    /// Returns the number of loads currently in flight.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Read-only prediction counters for the surrounding instrumentation.
    pub fn stats(&self) -> &LvpStats {
        &self.stats
    }

    /// Reads the raw classification counter for a load slot.
    pub fn counter(&self, pc: u64) -> u8 {
        self.lct.counter(pc)
    }

    /// Pops the oldest in-flight record for `pc`.
    ///
    /// Returns `None` without touching the queue when no record for `pc`
    /// exists. Otherwise any records in front of the match are dropped:
    /// resolutions arrive in program order, so they can only belong to
    /// older loads that were flushed without a squash call.
    fn take_in_flight(&mut self, pc: u64) -> Option<InFlight> {
        let pos = self.in_flight.iter().position(|r| r.pc == pc)?;
        for stale in self.in_flight.drain(..pos) {
            self.stats.squashed += 1;
            trace!(target: "lvp", stale_pc = stale.pc, "dropping stale in-flight record");
        }
        self.in_flight.pop_front()
    }
}
