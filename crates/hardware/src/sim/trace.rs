//! Per-instruction execution trace.
//!
//! The trace is a user-facing text log, separate from `tracing` diagnostics.
//! When enabled, every retired instruction produces one line of the form
//!
//! ```text
//!      3 => 00000008 : 00b50533    add a0,a0,a1
//! ```
//!
//! preceded by any register or memory writes the instruction performed, and
//! suffixed with ` {T}` when a conditional branch was taken.

use std::io::Write;

/// Header written once when a trace begins.
pub const TRACE_HEADER: &str = "Simulator logging enabled";

/// Receiver of execution trace events.
///
/// [`NullTrace`] is used when tracing is off; the executor asks
/// [`enabled`](TraceSink::enabled) before doing any work that only feeds the
/// trace (such as disassembly).
pub trait TraceSink {
    /// Returns `true` if events are recorded.
    fn enabled(&self) -> bool;

    /// Called once before the first instruction.
    fn begin(&mut self) {}

    /// A register write. Index 0 is reported as an ignored write.
    fn register_write(&mut self, idx: usize, val: u32);

    /// A memory write of an already width-truncated value.
    fn memory_write(&mut self, addr: u32, val: u32);

    /// One retired instruction.
    fn retire(&mut self, seq: u64, pc: u32, word: u32, text: &str, taken: bool);

    /// Called once after the halting instruction.
    fn end(&mut self) {}
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn begin(&mut self) {
        (**self).begin();
    }

    fn register_write(&mut self, idx: usize, val: u32) {
        (**self).register_write(idx, val);
    }

    fn memory_write(&mut self, addr: u32, val: u32) {
        (**self).memory_write(addr, val);
    }

    fn retire(&mut self, seq: u64, pc: u32, word: u32, text: &str, taken: bool) {
        (**self).retire(seq, pc, word, text, taken);
    }

    fn end(&mut self) {
        (**self).end();
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn enabled(&self) -> bool {
        false
    }

    fn register_write(&mut self, _idx: usize, _val: u32) {}

    fn memory_write(&mut self, _addr: u32, _val: u32) {}

    fn retire(&mut self, _seq: u64, _pc: u32, _word: u32, _text: &str, _taken: bool) {}
}

/// Formats trace events onto any [`Write`] implementor.
///
/// The first I/O error is reported through `tracing` and the trace is
/// switched off; simulation continues unaffected.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> WriterTrace<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    /// Returns `true` once a write has failed.
    pub const fn failed(&self) -> bool {
        self.failed
    }

    /// Borrows the inner writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    fn flush(&mut self) {
        if self.failed {
            return;
        }
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "trace flush failed, disabling trace");
            self.failed = true;
        }
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if self.failed {
            return;
        }
        if let Err(e) = self.out.write_fmt(args) {
            tracing::warn!(error = %e, "trace output failed, disabling trace");
            self.failed = true;
        }
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn enabled(&self) -> bool {
        !self.failed
    }

    fn begin(&mut self) {
        self.emit(format_args!("{TRACE_HEADER}\n"));
        self.flush();
    }

    fn register_write(&mut self, idx: usize, val: u32) {
        if idx == 0 {
            self.emit(format_args!(" Ignored write to x0\n"));
        } else {
            self.emit(format_args!(" Register write: x{idx} = 0x{val:08X}\n"));
        }
    }

    fn memory_write(&mut self, addr: u32, val: u32) {
        self.emit(format_args!(" Memory write: MEM[0x{addr:08X}] = 0x{val:08X}\n"));
    }

    fn retire(&mut self, seq: u64, pc: u32, word: u32, text: &str, taken: bool) {
        let marker = if taken { " {T}" } else { "" };
        self.emit(format_args!("{seq:6} => {pc:08x} : {word:08x}    {text}{marker}\n"));
    }

    fn end(&mut self) {
        self.flush();
    }
}
