//! Arithmetic Logic Unit (ALU).
//!
//! Implements the RV32I integer operations and the Multiply/Divide (M)
//! extension on 32-bit register values. Overflow wraps silently.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::isa::ops::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift amount; only bits 4:0 are used)
    ///
    /// # Examples
    ///
    /// ```
    /// use rv32sim_core::core::units::alu::Alu;
    /// use rv32sim_core::isa::ops::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7fff_ffff, 1), 0x8000_0000);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 36), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 0), u32::MAX);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => arithmetic::execute(op, a, b),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}
