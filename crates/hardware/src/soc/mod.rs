//! Collaborators the CPU talks to.
//!
//! The core reaches memory and the host console only through the traits in
//! this module, so tests and embedders can swap in their own backing stores.

/// Host console used by the environment-call services.
pub mod console;

/// Sparse, page-backed memory.
pub mod memory;

/// Memory access trait.
pub mod traits;

pub use console::{BufferConsole, Console, StdConsole};
pub use memory::SparseMemory;
pub use traits::Memory;
