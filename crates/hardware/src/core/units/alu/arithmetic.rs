//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction, multiplication, and division for
//! RV32, including the full M-extension multiply/divide family.
//!
//! Division never traps. By zero: DIV gives -1, DIVU gives all ones, REM and
//! REMU give the dividend. Overflow (`i32::MIN / -1`): DIV gives `i32::MIN`,
//! REM gives 0.

use crate::isa::ops::AluOp;

/// Number of bits in a 32-bit word (used for high-multiply shift).
const WORD_BITS: u32 = 32;

/// Executes an integer arithmetic operation.
///
/// Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => ((a as i32 as i64 * b as i32 as i64) >> WORD_BITS) as u32,
        AluOp::Mulhsu => {
            // Sign-extend a, zero-extend b; the product is taken at 128 bits.
            ((a as i32 as i128 * b as u64 as i128) >> WORD_BITS) as u32
        }
        AluOp::Mulhu => ((a as u64 * b as u64) >> WORD_BITS) as u32,
        AluOp::Div => {
            if b == 0 {
                u32::MAX
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        AluOp::Divu => a.checked_div(b).unwrap_or(u32::MAX),
        AluOp::Rem => {
            if b == 0 {
                a
            } else {
                (a as i32).wrapping_rem(b as i32) as u32
            }
        }
        AluOp::Remu => a.checked_rem(b).unwrap_or(a),
        _ => 0,
    }
}
