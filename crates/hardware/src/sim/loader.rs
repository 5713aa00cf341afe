//! Program Image Loader.
//!
//! This module turns a program file into bytes placed in simulated memory. It performs:
//! 1. **ELF parsing:** Reads a little-endian RV32 ELF with `object`, collecting loadable segments.
//! 2. **Symbol extraction:** Gathers function and label symbols for disassembly.
//! 3. **Flat images:** Wraps a raw binary at a caller-chosen base address.
//! 4. **Placement:** Copies segments into any [`Memory`], zero-filling the BSS tail.

use std::fs;

use object::{Architecture, Object, ObjectSegment, ObjectSymbol, SymbolKind};

use crate::common::error::LoaderError;
use crate::sim::symbols::Symbols;
use crate::soc::traits::Memory;

/// One contiguous region of the program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Load address.
    pub addr: u32,
    /// Bytes present in the file.
    pub data: Vec<u8>,
    /// Size in memory; bytes past `data.len()` are zero.
    pub mem_size: u32,
}

/// A program ready to be placed in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    /// Entry point.
    pub entry: u32,
    /// Loadable segments in file order.
    pub segments: Vec<Segment>,
    /// Symbols found in the file (empty for flat images).
    pub symbols: Symbols,
}

impl Image {
    /// Parses an ELF32 RISC-V executable.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The complete file contents.
    ///
    /// # Returns
    ///
    /// The image, or a [`LoaderError`] if the file is malformed, is not a
    /// little-endian RV32 object, or places a segment above 4 GiB.
    pub fn from_elf(bytes: &[u8]) -> Result<Self, LoaderError> {
        let file = object::File::parse(bytes)?;
        if file.architecture() != Architecture::Riscv32 || !file.is_little_endian() {
            return Err(LoaderError::NotRiscv32(format!(
                "{:?}, {}",
                file.architecture(),
                if file.is_little_endian() {
                    "little-endian"
                } else {
                    "big-endian"
                }
            )));
        }

        let mut segments = Vec::new();
        for seg in file.segments() {
            let (addr, size) = (seg.address(), seg.size());
            if size == 0 {
                continue;
            }
            let fits = addr
                .checked_add(size)
                .is_some_and(|end| end <= 1 << 32);
            if !fits {
                return Err(LoaderError::SegmentOutOfRange { addr, size });
            }
            let data = seg.data()?.to_vec();
            segments.push(Segment {
                addr: addr as u32,
                data,
                mem_size: size as u32,
            });
        }

        let symbols = file
            .symbols()
            .filter(|sym| matches!(sym.kind(), SymbolKind::Text | SymbolKind::Label))
            .filter_map(|sym| {
                let name = sym.name().ok()?;
                (!name.is_empty()).then(|| (sym.address() as u32, name.to_string()))
            })
            .collect::<Symbols>();

        let entry = file.entry() as u32;
        tracing::info!(
            segments = segments.len(),
            symbols = symbols.len(),
            "ELF parsed, entry {entry:#010x}"
        );

        Ok(Self {
            entry,
            segments,
            symbols,
        })
    }

    /// Wraps a raw binary loaded at `base`, with the entry point at `base`.
    pub fn from_flat(bytes: &[u8], base: u32) -> Self {
        Self {
            entry: base,
            segments: vec![Segment {
                addr: base,
                data: bytes.to_vec(),
                mem_size: bytes.len() as u32,
            }],
            symbols: Symbols::new(),
        }
    }

    /// Reads and parses an ELF file from disk.
    pub fn load_file(path: &str) -> Result<Self, LoaderError> {
        Self::from_elf(&read_file(path)?)
    }

    /// Reads a raw binary from disk and places it at `base`.
    pub fn load_flat_file(path: &str, base: u32) -> Result<Self, LoaderError> {
        Ok(Self::from_flat(&read_file(path)?, base))
    }

    /// Copies every segment into `memory`, zero-filling past the file bytes.
    pub fn load_into(&self, memory: &mut dyn Memory) {
        for seg in &self.segments {
            memory.write_bytes(seg.addr, &seg.data);
            let file_len = seg.data.len() as u32;
            if seg.mem_size > file_len {
                let zeros = vec![0u8; (seg.mem_size - file_len) as usize];
                memory.write_bytes(seg.addr.wrapping_add(file_len), &zeros);
            }
            tracing::debug!(size = seg.mem_size, "segment loaded at {:#010x}", seg.addr);
        }
    }
}

fn read_file(path: &str) -> Result<Vec<u8>, LoaderError> {
    fs::read(path).map_err(|source| LoaderError::Io {
        path: path.to_string(),
        source,
    })
}
