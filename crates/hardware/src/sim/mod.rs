//! Simulation driver and its software-side collaborators.
//!
//! Provides program loading, the symbol table, the execution trace and the
//! [`Simulator`] that ties them to a [`Cpu`](crate::core::Cpu).

/// ELF and flat binary loading.
pub mod loader;

/// Simulator driver and the `simulate` entry point.
pub mod simulator;

/// Address-to-name lookup.
pub mod symbols;

/// Per-instruction execution trace.
pub mod trace;

pub use loader::Image;
pub use simulator::{Simulator, simulate};
pub use symbols::{SymbolTable, Symbols};
pub use trace::{NullTrace, TraceSink, WriterTrace};
