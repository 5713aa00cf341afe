//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that all direction
//! predictors implement. The bank consults a predictor once per retired
//! conditional branch, then trains it with the resolved outcome.

/// Trait for conditional-branch direction predictors.
pub trait BranchPredictor {
    /// Predicts whether the branch at `pc` will be taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    /// * `target` - Address the branch jumps to when taken
    fn predict(&self, pc: u32, target: u32) -> bool;

    /// Trains the predictor with the resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    /// * `target` - Address the branch jumps to when taken
    /// * `taken` - Whether the branch was actually taken
    fn update(&mut self, pc: u32, target: u32, taken: bool);
}
