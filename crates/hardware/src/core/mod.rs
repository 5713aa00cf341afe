//! Processor core.
//!
//! Holds the architectural state ([`arch`]), the functional units
//! ([`units`]) and the [`Cpu`] that drives them one instruction at a time.

/// Architectural state (general-purpose registers).
pub mod arch;

/// The CPU and its per-instruction execution.
pub mod cpu;

/// Functional units (ALU, branch prediction).
pub mod units;

pub use cpu::{Cpu, Env, HaltReason};
