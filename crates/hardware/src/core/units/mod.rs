//! Execution units and functional components.
//!
//! This module contains the integer ALU and the branch prediction unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch prediction unit: predictor models and their accuracy bank.
pub mod bru;
