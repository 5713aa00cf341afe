//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()` and `update()` are O(1).
//! - **Space Complexity:** one two-bit counter per table entry.
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::{BranchPredictor, counter::Counter};

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: u32,
    /// Pattern History Table containing two-bit saturating counters.
    pht: Vec<Counter>,
    /// `entries - 1`; also bounds the history length.
    mask: u32,
}

impl GSharePredictor {
    /// Creates a gshare predictor with `entries` counters.
    ///
    /// The history register keeps `log2(entries)` outcomes.
    pub fn new(entries: usize) -> Self {
        Self {
            ghr: 0,
            pht: vec![Counter::default(); entries],
            mask: (entries as u32).wrapping_sub(1),
        }
    }

    /// Number of counters in the table.
    pub fn entries(&self) -> usize {
        self.pht.len()
    }

    /// Current global history register.
    pub const fn history(&self) -> u32 {
        self.ghr
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Computes the XOR of the PC (shifted) and the Global History Register.
    fn index(&self, pc: u32) -> usize {
        (((pc >> 2) ^ self.ghr) & self.mask) as usize
    }
}

impl BranchPredictor for GSharePredictor {
    fn predict(&self, pc: u32, _target: u32) -> bool {
        self.pht[self.index(pc)].taken()
    }

    /// Updates the two-bit counter at the hashed index, then shifts the
    /// outcome into the Global History Register.
    fn update(&mut self, pc: u32, _target: u32, taken: bool) {
        let idx = self.index(pc);
        self.pht[idx] = self.pht[idx].train(taken);
        self.ghr = ((self.ghr << 1) | u32::from(taken)) & self.mask;
    }
}
