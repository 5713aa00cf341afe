//! Error and fault definitions.
//!
//! This module defines the error types used across the simulator. It provides:
//! 1. **Faults:** Fatal conditions that stop the executor (unhandled ecall, illegal opcode).
//! 2. **Loader errors:** Failures while reading or parsing a program image.
//! 3. **Configuration errors:** Malformed JSON or invalid predictor geometry.
//!
//! Faults are not returned as `Err`; the executor records them in its halt
//! reason and the statistics gathered so far remain available.

use serde::Serialize;
use thiserror::Error;

/// Fatal execution condition.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum Fault {
    /// `ecall` with a call number in `a7` that is not serviced.
    #[error("Unhandled ecall {call} at {pc:#010x}")]
    UnhandledEcall {
        /// Value of `a7`.
        call: u32,
        /// Address of the `ecall`.
        pc: u32,
    },

    /// Word whose major opcode is not part of RV32IM.
    #[error("Unknown opcode: {word:#010x} at {pc:#010x}")]
    IllegalOpcode {
        /// Raw instruction word.
        word: u32,
        /// Address it was fetched from.
        pc: u32,
    },
}

/// Program image loading failure.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a parseable object file.
    #[error("malformed ELF: {0}")]
    Elf(#[from] object::read::Error),

    /// The object file is not a little-endian 32-bit RISC-V executable.
    #[error("not a little-endian RV32 ELF (found {0})")]
    NotRiscv32(String),

    /// A segment does not fit in the 32-bit address space.
    #[error("segment at {addr:#x} with size {size:#x} lies outside the 32-bit address space")]
    SegmentOutOfRange {
        /// Segment start address.
        addr: u64,
        /// Segment size in memory.
        size: u64,
    },
}

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON text is malformed or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A predictor table size is zero or not a power of two.
    #[error("{kind} table size {size} must be a non-zero power of two")]
    TableSize {
        /// Predictor family (`bimodal` or `gshare`).
        kind: &'static str,
        /// Offending size.
        size: usize,
    },

    /// The configuration file could not be read.
    #[error("could not read configuration '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
