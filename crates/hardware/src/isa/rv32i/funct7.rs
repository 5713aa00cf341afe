//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) distinguishes R-type operations that share
//! the same `funct3` (ADD vs SUB). For immediate shifts the same bits sit in
//! the upper part of the I immediate and select SRLI vs SRAI.

/// Default operation (ADD, SRL, SLLI, SRLI, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA, SRAI).
pub const SUB: u32 = 0b0100000;
/// Alias for SUB (used for Shift Right Arithmetic).
pub const SRA: u32 = 0b0100000;
