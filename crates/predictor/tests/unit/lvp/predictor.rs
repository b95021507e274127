//! # Predictor Engine Tests
//!
//! Verifies the full predict → resolve → train loop: cold-start
//! behavior, confidence warmup, constant classification, misprediction
//! decay under both verification modes, squash handling, and the
//! statistics counters.

use lvp_core::config::{Config, CvuConfig, CvuMode};
use lvp_core::lvp::{LoadPrediction, LoadValuePredictor, Resolution};
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn predictor(config: &Config) -> LoadValuePredictor {
    match LoadValuePredictor::new(config) {
        Ok(p) => p,
        Err(e) => panic!("config rejected: {e}"),
    }
}

fn small_config() -> Config {
    Config {
        lvpt_size: 16,
        lct_size: 16,
        ..Config::default()
    }
}

/// Run `n` full predict/resolve cycles of the same load and value.
fn train(lvp: &mut LoadValuePredictor, pc: u64, value: u64, n: usize) {
    for _ in 0..n {
        let _ = lvp.predict(pc);
        let _ = lvp.resolve(pc, value);
    }
}

// ══════════════════════════════════════════════════════════
// 1. Cold start
// ══════════════════════════════════════════════════════════

/// A fresh predictor issues no speculation and reports an ungraded
/// resolution.
#[test]
fn cold_predictor_issues_nothing() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    let prediction = lvp.predict(pc);
    assert_eq!(
        prediction,
        LoadPrediction {
            value: None,
            constant: false
        }
    );

    let outcome = lvp.resolve(pc, 42);
    assert_eq!(
        outcome,
        Resolution {
            predicted: false,
            correct: None
        }
    );
}

// ══════════════════════════════════════════════════════════
// 2. Warmup and constant classification
// ══════════════════════════════════════════════════════════

/// A steady load starts speculating once its counter crosses the
/// midpoint: one resolution to populate the LVPT, two more to grade the
/// stored value up to the threshold.
#[test]
fn warms_up_after_three_resolutions() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 3);

    let prediction = lvp.predict(pc);
    assert_eq!(prediction.value, Some(42));
    assert!(!prediction.constant);

    let outcome = lvp.resolve(pc, 42);
    assert_eq!(
        outcome,
        Resolution {
            predicted: true,
            correct: Some(true)
        }
    );
}

/// A fourth graded resolution saturates the 2-bit counter and the load
/// is flagged constant.
#[test]
fn constant_after_saturation() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 4);

    let prediction = lvp.predict(pc);
    assert_eq!(prediction.value, Some(42));
    assert!(prediction.constant);

    let _ = lvp.resolve(pc, 42);
}

// ══════════════════════════════════════════════════════════
// 3. Misprediction and verification modes
// ══════════════════════════════════════════════════════════

/// A value flip is reported as an incorrect prediction and decays the
/// classification counter.
#[test]
fn misprediction_reported_and_decays() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 4);
    assert_eq!(lvp.counter(pc), 3);

    let prediction = lvp.predict(pc);
    assert_eq!(prediction.value, Some(42));

    let outcome = lvp.resolve(pc, 99);
    assert_eq!(
        outcome,
        Resolution {
            predicted: true,
            correct: Some(false)
        }
    );
    assert_eq!(lvp.counter(pc), 2);
    assert_eq!(lvp.stats().mispredictions, 1);
}

/// Under the corroborating CVU a single flip decays confidence twice:
/// the refreshed value verifies on the next cycle, but the recorded miss
/// suppresses the confirmation, so the counter keeps falling and the
/// load stops speculating.
#[test]
fn corroborating_cvu_damps_after_flip() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 4);
    train(&mut lvp, pc, 99, 1); // flip: counter 3 -> 2, miss recorded

    // The refreshed value verifies, yet confidence still decays.
    let prediction = lvp.predict(pc);
    assert_eq!(prediction.value, Some(99));
    let outcome = lvp.resolve(pc, 99);
    assert_eq!(outcome.correct, Some(true));
    assert_eq!(lvp.counter(pc), 1);

    // Below the midpoint: no speculation on the next fetch.
    let prediction = lvp.predict(pc);
    assert_eq!(prediction.value, None);
    let _ = lvp.resolve(pc, 99);
}

/// The pass-through unit takes the raw outcome at face value: after the
/// same flip the refreshed value re-confirms immediately and the load
/// keeps speculating.
#[test]
fn passthrough_recovers_immediately() {
    let config = Config {
        cvu: CvuConfig {
            mode: CvuMode::Passthrough,
            ..CvuConfig::default()
        },
        ..small_config()
    };
    let mut lvp = predictor(&config);
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 4);
    train(&mut lvp, pc, 99, 1); // flip: counter 3 -> 2

    train(&mut lvp, pc, 99, 1); // raw correct: counter 2 -> 3
    assert_eq!(lvp.counter(pc), 3);

    let prediction = lvp.predict(pc);
    assert_eq!(prediction.value, Some(99));
    assert!(prediction.constant);
    let _ = lvp.resolve(pc, 99);
}

/// Invalidating a load clears its verification window, so the first
/// correct outcome after a flip confirms as if the slot were fresh.
#[test]
fn invalidate_clears_damping_window() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 4);
    train(&mut lvp, pc, 99, 1); // flip: counter 3 -> 2, miss recorded

    lvp.invalidate(pc);

    train(&mut lvp, pc, 99, 1); // confirmed: counter 2 -> 3
    assert_eq!(lvp.counter(pc), 3);
}

// ══════════════════════════════════════════════════════════
// 4. Classification aliasing and LVPT fallback
// ══════════════════════════════════════════════════════════

/// Two loads sharing an LCT counter but not an LVPT slot: the second
/// load inherits predict confidence, falls back to no-speculation while
/// its own LVPT slot is cold, and starts speculating right after its
/// first resolution.
#[test]
fn predict_class_with_cold_slot_falls_back() {
    let config = Config {
        lvpt_size: 16,
        lct_size: 4,
        inst_shift_amt: 0,
        ..Config::default()
    };
    let mut lvp = predictor(&config);
    let (pc_a, pc_b) = (1, 5); // same LCT slot, distinct LVPT slots

    train(&mut lvp, pc_a, 7, 4);

    // Inherited confidence, but nothing to speculate with yet.
    let prediction = lvp.predict(pc_b);
    assert_eq!(prediction.value, None);
    assert!(!prediction.constant);
    let outcome = lvp.resolve(pc_b, 9);
    assert_eq!(outcome.correct, None);

    // The slot is populated now; the shared counter was not consumed.
    let prediction = lvp.predict(pc_b);
    assert_eq!(prediction.value, Some(9));
    assert!(prediction.constant);
    let _ = lvp.resolve(pc_b, 9);
}

// ══════════════════════════════════════════════════════════
// 5. Squash
// ══════════════════════════════════════════════════════════

/// A squash discards every in-flight record without training anything.
#[test]
fn squash_discards_in_flight() {
    let mut lvp = predictor(&small_config());

    let _ = lvp.predict(0x1000);
    let _ = lvp.predict(0x2000);
    lvp.squash();

    assert_eq!(lvp.in_flight_len(), 0);
    assert_eq!(lvp.stats().squashed, 2);

    // The flushed loads never resolved: tables are untouched.
    assert_eq!(lvp.counter(0x1000), 0);
    let outcome = lvp.resolve(0x1000, 42);
    assert_eq!(
        outcome,
        Resolution {
            predicted: false,
            correct: None
        }
    );
    assert_eq!(lvp.stats().resolutions, 0);
}

// ══════════════════════════════════════════════════════════
// 6. Statistics
// ══════════════════════════════════════════════════════════

/// The counters are consistent with the event stream that produced them.
#[test]
fn stats_track_event_stream() {
    let mut lvp = predictor(&small_config());
    let pc = 0x1000;

    train(&mut lvp, pc, 42, 4); // 1 cold miss, then 3 hits, 1 speculation
    train(&mut lvp, pc, 99, 1); // speculation resolves incorrect

    let stats = lvp.stats();
    assert_eq!(stats.lookups, 5);
    assert_eq!(stats.lvpt_hits, 4);
    assert_eq!(stats.predictions, 2);
    assert_eq!(stats.correct, 1);
    assert_eq!(stats.mispredictions, 1);
    assert_eq!(stats.resolutions, 5);
    assert_eq!(stats.squashed, 0);
}
