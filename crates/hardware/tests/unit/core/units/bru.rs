//! Branch Predictor Tests.

use proptest::prelude::*;

use rv32sim_core::common::ConfigError;
use rv32sim_core::config::PredictorConfig;
use rv32sim_core::core::units::bru::BranchPredictor;
use rv32sim_core::core::units::bru::PredictorBank;
use rv32sim_core::core::units::bru::bimodal::BimodalPredictor;
use rv32sim_core::core::units::bru::counter::Counter;
use rv32sim_core::core::units::bru::gshare::GSharePredictor;
use rv32sim_core::core::units::bru::static_bp::{BtfntPredictor, NotTakenPredictor};
use rv32sim_core::stats::SimStats;

#[test]
fn counter_saturates_in_both_directions() {
    let mut c = Counter::default();
    assert_eq!(c, Counter::WeaklyNotTaken);
    assert!(!c.taken());

    for _ in 0..5 {
        c = c.train(true);
    }
    assert_eq!(c, Counter::StronglyTaken);

    c = c.train(false);
    assert_eq!(c, Counter::WeaklyTaken);
    assert!(c.taken());

    for _ in 0..5 {
        c = c.train(false);
    }
    assert_eq!(c, Counter::StronglyNotTaken);
}

#[test]
fn counter_hysteresis() {
    let c = Counter::StronglyTaken.train(false);
    assert!(c.taken(), "one miss must not flip a strong counter");
    assert!(!c.train(false).taken());
}

proptest! {
    #[test]
    fn not_taken_never_predicts_taken(pc in any::<u32>(), target in any::<u32>()) {
        prop_assert!(!NotTakenPredictor.predict(pc, target));
    }

    #[test]
    fn btfnt_predicts_backward_branches(pc in any::<u32>(), target in any::<u32>()) {
        prop_assert_eq!(BtfntPredictor.predict(pc, target), target < pc);
    }
}

#[test]
fn bimodal_learns_a_taken_branch() {
    let mut bp = BimodalPredictor::new(256);
    let pc = 0x1000;
    assert!(!bp.predict(pc, 0x0F00));
    bp.update(pc, 0x0F00, true);
    assert!(bp.predict(pc, 0x0F00));
    assert_eq!(bp.entries(), 256);
}

#[test]
fn bimodal_aliases_on_low_pc_bits() {
    let mut bp = BimodalPredictor::new(4);
    bp.update(0x0, 0, true);
    assert!(bp.predict(0x10, 0), "0x10 maps to the same counter as 0x0");
    assert!(!bp.predict(0x4, 0));
}

#[test]
fn gshare_history_shifts_and_masks() {
    let mut bp = GSharePredictor::new(4);
    bp.update(0x100, 0, true);
    assert_eq!(bp.history(), 0b1);
    bp.update(0x100, 0, false);
    assert_eq!(bp.history(), 0b10);
    bp.update(0x100, 0, true);
    assert_eq!(bp.history(), 0b01, "history keeps log2(entries) bits");
}

#[test]
fn gshare_separates_contexts() {
    let mut bp = GSharePredictor::new(16);
    // ghr == 0 at index (pc >> 2).
    bp.update(0x0, 0, true);
    bp.update(0x0, 0, true);
    // ghr is now 0b11; index 3 is still untrained.
    assert!(!bp.predict(0x0, 0));
}

fn small_bank() -> PredictorBank {
    PredictorBank::new(&PredictorConfig {
        bimodal_sizes: vec![256],
        gshare_sizes: vec![256],
    })
    .expect("valid geometry")
}

#[test]
fn bank_labels_in_report_order() {
    let bank = PredictorBank::new(&PredictorConfig::default()).expect("valid geometry");
    let labels: Vec<String> = bank.models().map(|(p, _)| p.label()).collect();
    assert_eq!(
        labels,
        [
            "NT",
            "BTFNT",
            "bimodal-256",
            "bimodal-1024",
            "bimodal-4096",
            "bimodal-16384",
            "gshare-256",
            "gshare-1024",
            "gshare-4096",
            "gshare-16384",
        ]
    );
}

#[test]
fn bank_scores_a_loop_branch() {
    let mut bank = small_bank();
    // Backward loop branch: nine taken iterations, then fall through.
    for i in 0..10 {
        bank.record(0x100, 0xF0, i < 9);
    }

    let mut stats = SimStats::default();
    bank.report(&mut stats);

    assert_eq!(stats.nt.predictions, 10);
    assert_eq!(stats.nt.mispredictions, 9);
    assert_eq!(stats.btfnt.mispredictions, 1);
    assert_eq!(stats.bimodal.len(), 1);
    assert_eq!(stats.bimodal[0].name, "bimodal-256");
    assert_eq!(stats.bimodal[0].mispredictions, 2);
    assert_eq!(stats.gshare.len(), 1);
    assert_eq!(stats.gshare[0].predictions, 10);
}

#[test]
fn bank_counts_every_model_once_per_branch() {
    let mut bank = small_bank();
    bank.record(0x200, 0x300, false);
    bank.record(0x204, 0x100, true);
    for (_, counters) in bank.models() {
        assert_eq!(counters.predictions, 2);
        assert!(counters.mispredictions <= 2);
    }
}

#[test]
fn report_replaces_previous_tables() {
    let bank = PredictorBank::default();
    let mut stats = SimStats::default();
    bank.report(&mut stats);
    bank.report(&mut stats);
    assert_eq!(stats.bimodal.len(), 4);
    assert_eq!(stats.gshare.len(), 4);
}

#[test]
fn bank_rejects_invalid_table_sizes() {
    let zero = PredictorConfig {
        bimodal_sizes: vec![0],
        gshare_sizes: vec![],
    };
    assert!(matches!(
        PredictorBank::new(&zero),
        Err(ConfigError::TableSize {
            kind: "bimodal",
            size: 0
        })
    ));

    let odd = PredictorConfig {
        bimodal_sizes: vec![],
        gshare_sizes: vec![12],
    };
    assert!(matches!(
        PredictorBank::new(&odd),
        Err(ConfigError::TableSize {
            kind: "gshare",
            size: 12
        })
    ));
}
