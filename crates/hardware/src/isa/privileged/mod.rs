//! System instruction definitions.
//!
//! Only the environment call is executed; every other SYSTEM encoding is
//! decoded as an opaque system word.

/// System instruction opcodes (ECALL) and environment call numbers.
pub mod opcodes;
