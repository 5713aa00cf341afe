//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA). Shift amounts are masked to 5 bits (0–31).

use crate::isa::ops::AluOp;

/// Bit mask for shift amount in RV32 (5 bits: 0-31).
const SHAMT_MASK_RV32: u32 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a shift variant).
/// * `a`  - The value to be shifted.
/// * `b`  - The shift amount (upper bits ignored).
///
/// Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let sh = b & SHAMT_MASK_RV32;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i32) >> sh) as u32,
        _ => 0,
    }
}
