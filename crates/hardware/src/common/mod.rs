//! Types shared across the simulator.

/// Error and fault types.
pub mod error;

pub use error::{ConfigError, Fault, LoaderError};
