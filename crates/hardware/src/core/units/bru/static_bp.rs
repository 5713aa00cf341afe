//! Static Branch Predictors.
//!
//! Neither model keeps state:
//! - [`NotTakenPredictor`] assumes every conditional branch falls through.
//! - [`BtfntPredictor`] predicts backward branches (loops) taken and forward
//!   branches not taken.

use super::BranchPredictor;

/// Always-not-taken predictor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotTakenPredictor;

impl BranchPredictor for NotTakenPredictor {
    fn predict(&self, _pc: u32, _target: u32) -> bool {
        false
    }

    fn update(&mut self, _pc: u32, _target: u32, _taken: bool) {}
}

/// Backward-taken, forward-not-taken predictor.
#[derive(Clone, Copy, Debug, Default)]
pub struct BtfntPredictor;

impl BranchPredictor for BtfntPredictor {
    /// Taken if and only if the target lies below the branch address.
    fn predict(&self, pc: u32, target: u32) -> bool {
        target < pc
    }

    fn update(&mut self, _pc: u32, _target: u32, _taken: bool) {}
}
