//! Simulation statistics collection and reporting.
//!
//! This module holds the results of a run. It provides:
//! 1. **Summary:** Retired-instruction count and the reason the run stopped.
//! 2. **Branch prediction:** Predictions, mispredictions and accuracy per model.
//! 3. **Output:** A sectioned text report and `serde` serialization for JSON.

use std::io::{self, Write};

use serde::Serialize;

use crate::core::cpu::HaltReason;

/// Accuracy counters of one predictor model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PredictorStats {
    /// Model label, e.g. `"BTFNT"` or `"gshare-1024"`.
    pub name: String,
    /// Conditional branches the model was consulted on.
    pub predictions: u64,
    /// Predictions that disagreed with the actual outcome.
    pub mispredictions: u64,
}

impl PredictorStats {
    /// Creates zeroed counters for the named model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predictions: 0,
            mispredictions: 0,
        }
    }

    /// Percentage of correct predictions, or 0 when nothing was predicted.
    pub fn accuracy(&self) -> f64 {
        if self.predictions == 0 {
            return 0.0;
        }
        let correct = self.predictions - self.mispredictions;
        100.0 * (correct as f64 / self.predictions as f64)
    }
}

/// Statistics returned by a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimStats {
    /// Instructions executed, including the one that halted the run.
    pub insns: u64,
    /// Why the run stopped; `None` while still running.
    pub halt: Option<HaltReason>,
    /// Always-not-taken model.
    pub nt: PredictorStats,
    /// Backward-taken/forward-not-taken model.
    pub btfnt: PredictorStats,
    /// One entry per configured bimodal table size.
    pub bimodal: Vec<PredictorStats>,
    /// One entry per configured gshare table size.
    pub gshare: Vec<PredictorStats>,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"` and `"branch"`.
/// Pass an empty slice to `write_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "branch"];

const RULE: &str = "==========================================================";
const SEPARATOR: &str = "----------------------------------------------------------";

impl SimStats {
    /// All predictor counters in report order.
    pub fn predictors(&self) -> impl Iterator<Item = &PredictorStats> {
        [&self.nt, &self.btfnt]
            .into_iter()
            .chain(&self.bimodal)
            .chain(&self.gshare)
    }

    /// Writes the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. An
    /// empty slice writes every section.
    pub fn write_sections(&self, out: &mut impl Write, sections: &[&str]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| *x == s);

        writeln!(out, "{RULE}")?;
        writeln!(out, "RV32IM SIMULATION STATISTICS")?;
        writeln!(out, "{RULE}")?;
        if want("summary") {
            writeln!(out, "sim_insts                {}", self.insns)?;
            match &self.halt {
                Some(reason) => writeln!(out, "halt                     {reason}")?,
                None => writeln!(out, "halt                     running")?,
            }
            writeln!(out, "{SEPARATOR}")?;
        }
        if want("branch") {
            writeln!(out, "BRANCH PREDICTION")?;
            for p in self.predictors() {
                writeln!(
                    out,
                    "  {:<14} predictions: {:<10} | mispredicts: {:<10} | accuracy: {:.2}%",
                    p.name,
                    p.predictions,
                    p.mispredictions,
                    p.accuracy()
                )?;
            }
        }
        writeln!(out, "{RULE}")
    }

    /// Writes every section.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        self.write_sections(out, &[])
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        if let Err(e) = self.write_report(&mut io::stdout().lock()) {
            tracing::warn!(error = %e, "failed to print statistics");
        }
    }
}
