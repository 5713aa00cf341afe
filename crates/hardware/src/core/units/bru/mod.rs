//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors tracked alongside execution:
//! static always-not-taken and backward-taken/forward-not-taken models, and
//! the adaptive bimodal and gshare models. [`PredictorBank`] runs all of them
//! side by side and keeps per-model accuracy counters.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Address-indexed two-bit counter predictor.
pub mod bimodal;

/// Two-bit saturating counter state.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictors (always not-taken, BTFNT).
pub mod static_bp;

use self::{
    bimodal::BimodalPredictor,
    gshare::GSharePredictor,
    static_bp::{BtfntPredictor, NotTakenPredictor},
};
use crate::common::error::ConfigError;
use crate::config::PredictorConfig;
use crate::stats::{PredictorStats, SimStats};

/// Enum wrapper for static dispatch of Branch Predictors.
#[derive(Clone, Debug)]
pub enum Predictor {
    /// Always predicts not taken.
    NotTaken(NotTakenPredictor),
    /// Backward taken, forward not taken.
    Btfnt(BtfntPredictor),
    /// Address-indexed two-bit counters.
    Bimodal(BimodalPredictor),
    /// History-XOR-address indexed two-bit counters.
    GShare(GSharePredictor),
}

impl Predictor {
    /// Short label used in statistics reports (e.g. `"gshare-1024"`).
    pub fn label(&self) -> String {
        match self {
            Self::NotTaken(_) => "NT".to_string(),
            Self::Btfnt(_) => "BTFNT".to_string(),
            Self::Bimodal(bp) => format!("bimodal-{}", bp.entries()),
            Self::GShare(bp) => format!("gshare-{}", bp.entries()),
        }
    }
}

impl BranchPredictor for Predictor {
    #[inline(always)]
    fn predict(&self, pc: u32, target: u32) -> bool {
        match self {
            Self::NotTaken(bp) => bp.predict(pc, target),
            Self::Btfnt(bp) => bp.predict(pc, target),
            Self::Bimodal(bp) => bp.predict(pc, target),
            Self::GShare(bp) => bp.predict(pc, target),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u32, target: u32, taken: bool) {
        match self {
            Self::NotTaken(bp) => bp.update(pc, target, taken),
            Self::Btfnt(bp) => bp.update(pc, target, taken),
            Self::Bimodal(bp) => bp.update(pc, target, taken),
            Self::GShare(bp) => bp.update(pc, target, taken),
        }
    }
}

/// A predictor together with its accuracy counters.
#[derive(Clone, Debug)]
struct Tracked {
    predictor: Predictor,
    stats: PredictorStats,
}

/// All predictor models evaluated side by side.
///
/// Holds one NT model, one BTFNT model, and one bimodal and one gshare model
/// per configured table size.
#[derive(Clone, Debug)]
pub struct PredictorBank {
    models: Vec<Tracked>,
}

impl PredictorBank {
    /// Builds the bank from the predictor configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableSize`] if any table size is zero or not a
    /// power of two.
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &PredictorConfig) -> Self {
        let statics = [
            Predictor::NotTaken(NotTakenPredictor),
            Predictor::Btfnt(BtfntPredictor),
        ];
        let bimodal = config
            .bimodal_sizes
            .iter()
            .map(|&n| Predictor::Bimodal(BimodalPredictor::new(n)));
        let gshare = config
            .gshare_sizes
            .iter()
            .map(|&n| Predictor::GShare(GSharePredictor::new(n)));

        let models = statics
            .into_iter()
            .chain(bimodal)
            .chain(gshare)
            .map(|predictor| Tracked {
                stats: PredictorStats::new(predictor.label()),
                predictor,
            })
            .collect();
        Self { models }
    }

    /// Records one resolved conditional branch in every model.
    ///
    /// Each model predicts first, is scored against `taken`, and is then
    /// trained with the outcome.
    pub fn record(&mut self, pc: u32, target: u32, taken: bool) {
        for model in &mut self.models {
            let predicted = model.predictor.predict(pc, target);
            model.stats.predictions += 1;
            if predicted != taken {
                model.stats.mispredictions += 1;
            }
            model.predictor.update(pc, target, taken);
        }
    }

    /// Iterates over every model with its counters, in report order.
    pub fn models(&self) -> impl Iterator<Item = (&Predictor, &PredictorStats)> {
        self.models.iter().map(|m| (&m.predictor, &m.stats))
    }

    /// Copies the accuracy counters into `stats`.
    pub fn report(&self, stats: &mut SimStats) {
        stats.bimodal.clear();
        stats.gshare.clear();
        for (predictor, counters) in self.models() {
            match predictor {
                Predictor::NotTaken(_) => stats.nt = counters.clone(),
                Predictor::Btfnt(_) => stats.btfnt = counters.clone(),
                Predictor::Bimodal(_) => stats.bimodal.push(counters.clone()),
                Predictor::GShare(_) => stats.gshare.push(counters.clone()),
            }
        }
    }
}

impl Default for PredictorBank {
    /// The default geometry: four bimodal and four gshare tables.
    fn default() -> Self {
        Self::build(&PredictorConfig::default())
    }
}
