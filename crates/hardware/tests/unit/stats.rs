//! Statistics Report Tests.

use rv32sim_core::HaltReason;
use rv32sim_core::common::error::Fault;
use rv32sim_core::stats::{PredictorStats, SimStats};

fn sample() -> SimStats {
    SimStats {
        insns: 42,
        halt: Some(HaltReason::Exit { call: 93 }),
        nt: PredictorStats {
            name: "NT".into(),
            predictions: 4,
            mispredictions: 3,
        },
        btfnt: PredictorStats {
            name: "BTFNT".into(),
            predictions: 4,
            mispredictions: 1,
        },
        bimodal: vec![PredictorStats::new("bimodal-256")],
        gshare: vec![],
    }
}

fn render(stats: &SimStats, sections: &[&str]) -> String {
    let mut out = Vec::new();
    stats.write_sections(&mut out, sections).expect("write to Vec");
    String::from_utf8(out).expect("utf-8 report")
}

#[test]
fn accuracy() {
    let stats = sample();
    assert!((stats.btfnt.accuracy() - 75.0).abs() < f64::EPSILON);
    assert!((stats.nt.accuracy() - 25.0).abs() < f64::EPSILON);
    assert!(stats.bimodal[0].accuracy().abs() < f64::EPSILON);
}

#[test]
fn predictors_in_report_order() {
    let names: Vec<String> = sample().predictors().map(|p| p.name.clone()).collect();
    assert_eq!(names, ["NT", "BTFNT", "bimodal-256"]);
}

#[test]
fn full_report() {
    let text = render(&sample(), &[]);
    assert!(text.contains("RV32IM SIMULATION STATISTICS"));
    assert!(text.contains("sim_insts                42"));
    assert!(text.contains("halt                     exit (ecall 93)"));
    assert!(text.contains("BTFNT"));
    assert!(text.contains("accuracy: 75.00%"));
}

#[test]
fn section_filter() {
    let text = render(&sample(), &["branch"]);
    assert!(!text.contains("sim_insts"));
    assert!(text.contains("BRANCH PREDICTION"));

    let text = render(&sample(), &["summary"]);
    assert!(text.contains("sim_insts"));
    assert!(!text.contains("BRANCH PREDICTION"));
}

#[test]
fn running_and_fault_halts() {
    let mut stats = SimStats::default();
    assert!(render(&stats, &["summary"]).contains("running"));

    stats.halt = Some(HaltReason::Fault(Fault::IllegalOpcode {
        word: 0,
        pc: 0x10,
    }));
    assert!(render(&stats, &["summary"]).contains("fault: Unknown opcode: 0x00000000 at 0x00000010"));
}

#[test]
fn json_output() {
    let value = serde_json::to_value(sample()).expect("serialize");
    assert_eq!(value["insns"], 42);
    assert_eq!(value["halt"]["Exit"]["call"], 93);
    assert_eq!(value["btfnt"]["mispredictions"], 1);
    assert_eq!(value["bimodal"][0]["name"], "bimodal-256");
}
