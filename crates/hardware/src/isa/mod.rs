//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, the shared decoder and
//! the disassembler, organized by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `rv32m`: Standard Extension for Integer Multiplication and Division.
//! * `privileged`: The SYSTEM opcode (only ECALL is executed).

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all RISC-V instruction formats.
pub mod decode;

/// Instruction disassembler for the execution trace and diagnostics.
pub mod disasm;

/// Instruction field extraction and the decoded instruction variant.
pub mod instruction;

/// Operation kinds (ALU, load/store width, branch predicate).
pub mod ops;

/// SYSTEM opcode definitions.
pub mod privileged;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv32m;
