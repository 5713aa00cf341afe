//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for RV32.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use std::fmt;

use crate::isa::abi;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; 32],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Forces `x0` back to zero. Called at the end of every retired instruction.
    pub fn clear_zero(&mut self) {
        self.regs[0] = 0;
    }
}

impl fmt::Display for Gpr {
    /// Four registers per line, ABI name and hexadecimal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..32).step_by(4) {
            for i in row..row + 4 {
                write!(f, "{:>4}={:#010x} ", abi::reg_name(i), self.regs[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
