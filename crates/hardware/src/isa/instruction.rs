//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the fixed RV32 instruction fields and the
//! [`Instruction`] variant produced once per fetch and shared by the executor
//! and the disassembler.

use crate::isa::ops::{AluOp, BranchCond, LoadWidth, StoreWidth};

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting the destination register field (bits 7-11).
pub const RD_MASK: u32 = 0x1F;
/// Bit mask for extracting the first source register field (bits 15-19).
pub const RS1_MASK: u32 = 0x1F;
/// Bit mask for extracting the second source register field (bits 20-24).
pub const RS2_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for the shift amount of immediate shifts (bits 20-24).
pub const SHAMT_MASK: u32 = 0x1F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Register 0 (x0) is hardwired to zero and writes are ignored.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the shift amount of an immediate shift (bits 20-24).
    fn shamt(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & RD_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & RS1_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & RS2_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> 20) & SHAMT_MASK
    }
}

/// A decoded RV32IM instruction.
///
/// Produced by [`crate::isa::decode::decode`]. Offsets and immediates are
/// already sign-extended; register indices are in `0..32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Register-register operation (base and multiply/divide groups).
    Op {
        /// ALU operation.
        op: AluOp,
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// Register-immediate operation. For shifts `imm` is the shift amount.
    OpImm {
        /// ALU operation.
        op: AluOp,
        /// Destination register.
        rd: usize,
        /// Source register.
        rs1: usize,
        /// Sign-extended I immediate or shift amount.
        imm: i32,
    },
    /// Memory load.
    Load {
        /// Access width and extension.
        width: LoadWidth,
        /// Destination register.
        rd: usize,
        /// Base register.
        rs1: usize,
        /// Signed 12-bit offset.
        offset: i32,
    },
    /// Memory store.
    Store {
        /// Access width.
        width: StoreWidth,
        /// Base register.
        rs1: usize,
        /// Source register.
        rs2: usize,
        /// Signed 12-bit offset.
        offset: i32,
    },
    /// Conditional branch.
    Branch {
        /// Branch predicate.
        cond: BranchCond,
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Signed 13-bit offset relative to the branch address.
        offset: i32,
    },
    /// PC-relative jump and link.
    Jal {
        /// Link register.
        rd: usize,
        /// Signed 21-bit offset relative to the jump address.
        offset: i32,
    },
    /// Register-indirect jump and link.
    Jalr {
        /// Link register.
        rd: usize,
        /// Base register.
        rs1: usize,
        /// Signed 12-bit offset.
        offset: i32,
    },
    /// Load upper immediate.
    Lui {
        /// Destination register.
        rd: usize,
        /// Immediate with the low 12 bits clear.
        imm: u32,
    },
    /// Add upper immediate to PC.
    Auipc {
        /// Destination register.
        rd: usize,
        /// Immediate with the low 12 bits clear.
        imm: u32,
    },
    /// Environment call (exactly `0x00000073`).
    Ecall,
    /// Any other SYSTEM-opcode word.
    System {
        /// Raw encoding.
        raw: u32,
    },
    /// Known opcode with an unrecognised funct3/funct7 combination.
    Unsupported {
        /// Raw encoding.
        raw: u32,
    },
    /// Unrecognised major opcode.
    Illegal {
        /// Raw encoding.
        raw: u32,
    },
}

impl Instruction {
    /// Returns `true` for a conditional branch.
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }
}
