//! RV32IM simulator CLI.
//!
//! This binary runs one program to completion. It performs:
//! 1. **Loading:** Reads an RV32 ELF (entry point and symbols) or a flat binary at `--raw <base>`.
//! 2. **Configuration:** Applies an optional JSON configuration and command-line overrides.
//! 3. **Execution:** Runs the simulator with the console on stdin/stdout and an optional trace file.
//! 4. **Reporting:** Prints the statistics report, or JSON with `--json`.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to change the level.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv32sim_core::config::Config;
use rv32sim_core::sim::{Image, Simulator, WriterTrace};
use rv32sim_core::soc::SparseMemory;

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "Instruction-accurate RV32IM simulator",
    long_about = "Run an RV32IM program until it exits through ecall 3 or 93.\n\nExamples:\n  rv32sim hello.elf\n  rv32sim --log trace.txt fib.elf\n  rv32sim --raw 0x0 prog.bin --json"
)]
struct Cli {
    /// Program to run (ELF unless --raw is given).
    path: String,

    /// Write the per-instruction execution trace to this file.
    #[arg(short, long)]
    log: Option<String>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Start address (hex with 0x prefix, or decimal). Overrides the entry point.
    #[arg(short, long, value_parser = parse_addr)]
    start: Option<u32>,

    /// Treat the program as a flat binary loaded at this address.
    #[arg(long, value_parser = parse_addr, value_name = "BASE")]
    raw: Option<u32>,

    /// Print statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

/// Parses `0x`-prefixed hexadecimal or plain decimal addresses.
fn parse_addr(text: &str) -> Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{text}': {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the program, runs it, and reports statistics.
///
/// Returns success when the program exited through an environment call and
/// failure when the run stopped on a fault.
fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let image = match cli.raw {
        Some(base) => Image::load_flat_file(&cli.path, base)?,
        None => Image::load_file(&cli.path)?,
    };
    let start = cli.start.or(config.general.start_pc).unwrap_or(image.entry);
    tracing::info!(path = %cli.path, "starting at {start:#010x}");

    let mut memory = SparseMemory::new();
    image.load_into(&mut memory);

    let log_path = cli
        .log
        .clone()
        .or_else(|| config.general.trace.then(|| format!("{}.log", cli.path)));

    let mut trace = match &log_path {
        Some(path) => Some(WriterTrace::new(BufWriter::new(File::create(path)?))),
        None => None,
    };

    let mut sim = Simulator::new(&mut memory, start, &config)?.with_symbols(&image.symbols);
    if let Some(trace) = trace.as_mut() {
        sim = sim.with_trace(trace);
    }

    let stats = sim.run();
    let faulted = stats.halt.as_ref().is_some_and(|h| !h.is_exit());
    if faulted {
        sim.cpu.dump_state(&mut io::stderr().lock())?;
    }
    drop(sim);

    if trace.as_ref().is_some_and(WriterTrace::failed) {
        tracing::error!(path = ?log_path, "execution trace is incomplete");
    }

    if cli.json {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &stats)?;
        writeln!(out)?;
    } else {
        stats.print();
    }

    Ok(if faulted {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
