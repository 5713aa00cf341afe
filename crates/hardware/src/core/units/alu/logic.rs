//! ALU logical and comparison operations.
//!
//! Implements bitwise OR, AND, XOR, and set-less-than (signed and unsigned).
//! Comparisons always produce 0 or 1.

use crate::isa::ops::AluOp;

/// Executes a logical or comparison operation.
///
/// Returns `0` for non-logic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Sltu => (a < b) as u32,
        _ => 0,
    }
}
