//! Configuration system for the RV32IM simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline values (trace off, four table sizes per adaptive predictor).
//! 2. **Structures:** `general` and `predictor` sections.
//! 3. **Validation:** Predictor tables must be non-zero powers of two.
//!
//! Configuration is supplied as JSON (`--config` on the command line) or via `Config::default()`.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Table sizes of the bimodal and gshare models when none are configured.
    pub const TABLE_SIZES: [usize; 4] = [256, 1024, 4096, 16384];
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace);
/// assert_eq!(config.predictor.bimodal_sizes, vec![256, 1024, 4096, 16384]);
/// ```
///
/// Deserializing from JSON; missing sections and fields take their defaults:
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let json = r#"{
///     "general": { "start_pc": 4096 },
///     "predictor": { "gshare_sizes": [64] }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.start_pc, Some(0x1000));
/// assert_eq!(config.predictor.gshare_sizes, vec![64]);
/// assert_eq!(config.predictor.bimodal_sizes.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Branch predictor bank geometry.
    pub predictor: PredictorConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks every predictor table size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.predictor.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Initial PC. `None` means the program image's entry point.
    pub start_pc: Option<u32>,

    /// Write the per-instruction trace.
    pub trace: bool,
}

/// Branch predictor bank geometry.
///
/// One bimodal and one gshare model is instantiated per listed size, in
/// order. The static NT and BTFNT models are always present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    /// Entry counts of the bimodal tables.
    pub bimodal_sizes: Vec<usize>,
    /// Entry counts of the gshare tables.
    pub gshare_sizes: Vec<usize>,
}

impl PredictorConfig {
    /// Checks that every table size is a non-zero power of two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bimodal = self.bimodal_sizes.iter().map(|&s| ("bimodal", s));
        let gshare = self.gshare_sizes.iter().map(|&s| ("gshare", s));
        for (kind, size) in bimodal.chain(gshare) {
            if !size.is_power_of_two() {
                return Err(ConfigError::TableSize { kind, size });
            }
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            bimodal_sizes: defaults::TABLE_SIZES.to_vec(),
            gshare_sizes: defaults::TABLE_SIZES.to_vec(),
        }
    }
}
