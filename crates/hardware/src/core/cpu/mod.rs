//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the complete
//! architectural state of one simulated hart. It coordinates the following:
//! 1. **State Management:** Maintains registers, the program counter and the run state.
//! 2. **Branch Prediction:** Owns the predictor bank scored on every conditional branch.
//! 3. **System Integration:** Reaches memory, console, trace and symbols only through [`Env`].
//!
//! Every `Cpu` is an independent value, so any number of simulations can run
//! side by side without sharing state.

/// Per-instruction execution.
pub mod execution;

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::common::error::{ConfigError, Fault};
use crate::config::PredictorConfig;
use crate::core::arch::gpr::Gpr;
use crate::core::units::bru::PredictorBank;
use crate::sim::symbols::SymbolTable;
use crate::sim::trace::TraceSink;
use crate::soc::console::Console;
use crate::soc::traits::Memory;
use crate::stats::SimStats;

/// Why the CPU stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// The program requested termination through an environment call.
    Exit {
        /// Call number found in `a7` (3 or 93).
        call: u32,
    },
    /// A fatal condition was hit.
    Fault(Fault),
}

impl HaltReason {
    /// Returns `true` for a normal, program-requested exit.
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit { call } => write!(f, "exit (ecall {call})"),
            Self::Fault(fault) => write!(f, "fault: {fault}"),
        }
    }
}

/// Collaborators borrowed by the CPU for one step.
///
/// None of them are owned; the caller keeps them alive across steps.
pub struct Env<'a> {
    /// Instruction and data memory.
    pub memory: &'a mut dyn Memory,
    /// Byte console for ecall 1 and 2.
    pub console: &'a mut dyn Console,
    /// Execution trace receiver.
    pub trace: &'a mut dyn TraceSink,
    /// Optional symbols for disassembly in the trace.
    pub symbols: Option<&'a dyn SymbolTable>,
}

impl fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("trace_enabled", &self.trace.enabled())
            .field("symbols", &self.symbols.is_some())
            .finish_non_exhaustive()
    }
}

/// Architectural state of one RV32IM hart.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Address of the next instruction to fetch.
    pub pc: u32,
    insns: u64,
    halted: Option<HaltReason>,
    bank: PredictorBank,
}

impl Cpu {
    /// Creates a CPU at `start_pc` with every register zero.
    ///
    /// # Arguments
    ///
    /// * `start_pc` - Address of the first instruction.
    /// * `predictors` - Table sizes of the adaptive predictor models.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableSize`] if a table size is zero or not a
    /// power of two.
    pub fn new(start_pc: u32, predictors: &PredictorConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_bank(start_pc, PredictorBank::new(predictors)?))
    }

    /// Creates a CPU at `start_pc` that scores branches with `bank`.
    pub fn with_bank(start_pc: u32, bank: PredictorBank) -> Self {
        Self {
            regs: Gpr::new(),
            pc: start_pc,
            insns: 0,
            halted: None,
            bank,
        }
    }

    /// Instructions executed so far, including a halting one.
    pub const fn insns(&self) -> u64 {
        self.insns
    }

    /// The halt reason, once the CPU has stopped.
    pub const fn halted(&self) -> Option<&HaltReason> {
        self.halted.as_ref()
    }

    /// The predictor bank with its accuracy counters.
    pub const fn predictors(&self) -> &PredictorBank {
        &self.bank
    }

    /// Snapshot of the statistics gathered so far.
    pub fn stats(&self) -> SimStats {
        let mut stats = SimStats {
            insns: self.insns,
            halt: self.halted.clone(),
            ..SimStats::default()
        };
        self.bank.report(&mut stats);
        stats
    }

    /// Writes the PC, instruction count and register file to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn dump_state(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "pc={:#010x} insns={}", self.pc, self.insns)?;
        write!(out, "{}", self.regs)
    }
}
