//! Bimodal Branch Predictor.
//!
//! A table of two-bit saturating counters indexed by the low bits of the
//! branch address (word-aligned, so bits 1:0 are dropped).

use super::{BranchPredictor, counter::Counter};

/// Bimodal predictor structure.
#[derive(Clone, Debug)]
pub struct BimodalPredictor {
    /// Pattern table of two-bit counters.
    table: Vec<Counter>,
    /// `entries - 1`; the table size is a power of two.
    mask: u32,
}

impl BimodalPredictor {
    /// Creates a bimodal predictor with `entries` counters.
    ///
    /// `entries` must be a non-zero power of two; see
    /// [`Config::validate`](crate::config::Config::validate).
    pub fn new(entries: usize) -> Self {
        Self {
            table: vec![Counter::default(); entries],
            mask: (entries as u32).wrapping_sub(1),
        }
    }

    /// Number of counters in the table.
    pub fn entries(&self) -> usize {
        self.table.len()
    }

    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) & self.mask) as usize
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict(&self, pc: u32, _target: u32) -> bool {
        self.table[self.index(pc)].taken()
    }

    fn update(&mut self, pc: u32, _target: u32, taken: bool) {
        let idx = self.index(pc);
        self.table[idx] = self.table[idx].train(taken);
    }
}
