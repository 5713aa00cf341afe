//! RV32IM instruction-accurate simulator library.
//!
//! This crate implements a single-hart RISC-V RV32IM simulator with the following:
//! 1. **ISA:** One shared decoder producing an [`isa::instruction::Instruction`] consumed by both the executor and the disassembler.
//! 2. **Core:** Register file, ALU, and the [`Cpu`] fetch-decode-execute step with console and exit environment calls.
//! 3. **Branch prediction:** NT, BTFNT, bimodal and gshare models scored side by side on every conditional branch.
//! 4. **SoC:** The [`soc::Memory`] and [`soc::Console`] collaborator traits with sparse-memory and in-memory console implementations.
//! 5. **Simulation:** ELF/flat loader, symbol table, execution trace, configuration and statistics.
//!
//! # Example
//!
//! ```
//! use rv32sim_core::soc::{BufferConsole, Memory, SparseMemory};
//! use rv32sim_core::{Config, Simulator};
//!
//! let mut mem = SparseMemory::new();
//! for (i, word) in [
//!     0x04800513, // addi a0, zero, 72 ('H')
//!     0x00200893, // addi a7, zero, 2
//!     0x00000073, // ecall
//!     0x05d00893, // addi a7, zero, 93
//!     0x00000073, // ecall
//! ]
//! .into_iter()
//! .enumerate()
//! {
//!     mem.write_u32(4 * i as u32, word);
//! }
//!
//! let mut console = BufferConsole::default();
//! let stats = Simulator::new(&mut mem, 0, &Config::default())?
//!     .with_console(&mut console)
//!     .run();
//! assert_eq!(stats.insns, 5);
//! assert_eq!(console.output(), b"H");
//! # Ok::<(), rv32sim_core::common::ConfigError>(())
//! ```

/// Shared error and fault types.
pub mod common;
/// Simulator configuration (general settings and predictor geometry).
pub mod config;
/// CPU core (architectural state, functional units, execution).
pub mod core;
/// Instruction set (fields, decode, ABI names, disassembly).
pub mod isa;
/// Simulation driver, loader, symbols and trace.
pub mod sim;
/// Memory and console collaborators.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// CPU architectural state and its halt reason.
pub use crate::core::{Cpu, HaltReason};
/// Simulator driver and the one-call entry point.
pub use crate::sim::{Simulator, simulate};
/// Statistics returned by a run.
pub use crate::stats::SimStats;
