//! Simulator: owns the CPU and the collaborators it runs against.
//!
//! The [`Cpu`] only borrows its environment for the duration of a step; the
//! `Simulator` keeps memory, console, trace sink and symbols together so a
//! caller can configure them once and then step or run to completion.

use std::fmt;
use std::io::Write;

use crate::common::error::ConfigError;
use crate::config::Config;
use crate::core::units::bru::PredictorBank;
use crate::core::{Cpu, Env, HaltReason};
use crate::sim::symbols::SymbolTable;
use crate::sim::trace::{NullTrace, TraceSink, WriterTrace};
use crate::soc::console::{Console, StdConsole};
use crate::soc::traits::Memory;
use crate::stats::SimStats;

/// Top-level simulator: CPU architectural state plus its environment.
pub struct Simulator<'a> {
    /// CPU architectural state (registers, PC, predictor bank).
    pub cpu: Cpu,
    memory: &'a mut dyn Memory,
    console: Box<dyn Console + 'a>,
    trace: Box<dyn TraceSink + 'a>,
    symbols: Option<&'a dyn SymbolTable>,
    started: bool,
    finished: bool,
}

impl fmt::Debug for Simulator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cpu", &self.cpu)
            .field("trace_enabled", &self.trace.enabled())
            .field("symbols", &self.symbols.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> Simulator<'a> {
    /// Creates a simulator starting at `start_pc`.
    ///
    /// The console defaults to stdin/stdout and tracing is off.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableSize`] if the predictor geometry in
    /// `config` is invalid.
    pub fn new(
        memory: &'a mut dyn Memory,
        start_pc: u32,
        config: &Config,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_cpu(memory, Cpu::new(start_pc, &config.predictor)?))
    }

    /// Creates a simulator around an already constructed CPU.
    pub fn from_cpu(memory: &'a mut dyn Memory, cpu: Cpu) -> Self {
        Self {
            cpu,
            memory,
            console: Box::new(StdConsole),
            trace: Box::new(NullTrace),
            symbols: None,
            started: false,
            finished: false,
        }
    }

    /// Replaces the console used by environment calls.
    #[must_use]
    pub fn with_console(mut self, console: impl Console + 'a) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Installs an execution trace sink.
    #[must_use]
    pub fn with_trace(mut self, trace: impl TraceSink + 'a) -> Self {
        self.trace = Box::new(trace);
        self
    }

    /// Installs a symbol table for trace disassembly.
    #[must_use]
    pub fn with_symbols(mut self, symbols: &'a dyn SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Executes one instruction.
    ///
    /// The trace sink is flushed once, on the step that halts the CPU.
    pub fn step(&mut self) -> Option<HaltReason> {
        if !self.started {
            self.started = true;
            if self.trace.enabled() {
                self.trace.begin();
            } else {
                tracing::warn!("Simulator logging disabled");
            }
        }

        let mut env = Env {
            memory: &mut *self.memory,
            console: &mut *self.console,
            trace: &mut *self.trace,
            symbols: self.symbols,
        };
        let halt = self.cpu.step(&mut env);
        if halt.is_some() && !self.finished {
            self.finished = true;
            self.trace.end();
        }
        halt
    }

    /// Runs until the CPU halts and returns the final statistics.
    pub fn run(&mut self) -> SimStats {
        while self.step().is_none() {}
        self.stats()
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> SimStats {
        self.cpu.stats()
    }
}

/// Runs a program to completion with the default predictor bank.
///
/// # Arguments
///
/// * `memory` - Memory holding the program; also used for loads and stores.
/// * `start` - Address of the first instruction.
/// * `log` - Optional destination for the execution trace.
/// * `symbols` - Optional symbols used to annotate branch targets in the trace.
///
/// # Returns
///
/// Statistics up to and including the halting instruction.
///
/// # Examples
///
/// ```
/// use rv32sim_core::sim::simulator::simulate;
/// use rv32sim_core::soc::{Memory, SparseMemory};
///
/// let mut mem = SparseMemory::new();
/// mem.write_u32(0, 0x05d00893); // addi a7, zero, 93
/// mem.write_u32(4, 0x00000073); // ecall
///
/// let stats = simulate(&mut mem, 0, None, None);
/// assert_eq!(stats.insns, 2);
/// assert!(stats.halt.is_some_and(|h| h.is_exit()));
/// ```
pub fn simulate<'a>(
    memory: &'a mut dyn Memory,
    start: u32,
    log: Option<&'a mut dyn Write>,
    symbols: Option<&'a dyn SymbolTable>,
) -> SimStats {
    let mut sim = Simulator::from_cpu(memory, Cpu::with_bank(start, PredictorBank::default()));
    if let Some(out) = log {
        sim = sim.with_trace(WriterTrace::new(out));
    }
    if let Some(symbols) = symbols {
        sim = sim.with_symbols(symbols);
    }
    sim.run()
}
