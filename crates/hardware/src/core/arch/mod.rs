//! RISC-V architectural state.
//!
//! Only the integer register file is modelled; the program counter lives on
//! the [`Cpu`](crate::core::Cpu) itself.

/// General-Purpose Register file implementation.
pub mod gpr;
