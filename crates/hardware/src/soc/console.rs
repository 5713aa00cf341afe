//! Host console for the environment-call services.
//!
//! Character input (call 1) blocks until a byte or end of stream is available;
//! character output (call 2) is flushed before the next instruction runs, so
//! program output interleaves deterministically with anything else sharing
//! the stream.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Blocking single-byte console.
pub trait Console {
    /// Reads one byte. `None` means end of stream.
    fn read_byte(&mut self) -> Option<u8>;

    /// Writes one byte and flushes it.
    fn write_byte(&mut self, byte: u8);
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }
}

/// Console backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match io::stdin().lock().read(&mut buf) {
            Ok(1) => Some(buf[0]),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "console read failed, treating as end of stream");
                None
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(&[byte]).and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "console write failed");
        }
    }
}

/// In-memory console: input is a fixed byte queue, output is collected.
#[derive(Clone, Debug, Default)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferConsole {
    /// Creates a console that will yield `input` and then end of stream.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into().into(),
            output: Vec::new(),
        }
    }

    /// Bytes written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output decoded lossily as UTF-8.
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Input bytes not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for BufferConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}
