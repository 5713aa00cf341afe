//! Sparse Memory Implementation.
//!
//! The full 4 GiB address space is backed lazily by 4 KiB pages stored in a
//! hash map. Untouched memory reads as zero, so a program image only costs the
//! pages it occupies plus whatever the program writes at run time (stack,
//! heap).

use std::collections::HashMap;

use crate::soc::traits::Memory;

/// Page size in bytes.
pub const PAGE_SIZE: usize = 4096;

const PAGE_SHIFT: u32 = 12;
const PAGE_OFFSET_MASK: u32 = (PAGE_SIZE as u32) - 1;

/// Lazily allocated, zero-initialised memory covering all 32-bit addresses.
#[derive(Clone, Debug, Default)]
pub struct SparseMemory {
    pages: HashMap<u32, Box<[u8; PAGE_SIZE]>>,
}

impl SparseMemory {
    /// Creates an empty memory; every address reads as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `data` into memory starting at `addr`.
    pub fn load(&mut self, addr: u32, data: &[u8]) {
        self.write_bytes(addr, data);
    }

    /// Number of pages that have been written to.
    pub fn resident_pages(&self) -> usize {
        self.pages.len()
    }

    fn byte(&self, addr: u32) -> u8 {
        self.pages
            .get(&(addr >> PAGE_SHIFT))
            .map_or(0, |page| page[(addr & PAGE_OFFSET_MASK) as usize])
    }

    fn byte_mut(&mut self, addr: u32) -> &mut u8 {
        let page = self
            .pages
            .entry(addr >> PAGE_SHIFT)
            .or_insert_with(|| Box::new([0; PAGE_SIZE]));
        &mut page[(addr & PAGE_OFFSET_MASK) as usize]
    }

    fn read_le<const N: usize>(&self, addr: u32) -> [u8; N] {
        let mut bytes = [0; N];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.byte(addr.wrapping_add(i as u32));
        }
        bytes
    }

    fn write_le(&mut self, addr: u32, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            *self.byte_mut(addr.wrapping_add(i as u32)) = *b;
        }
    }
}

impl Memory for SparseMemory {
    fn read_u8(&mut self, addr: u32) -> u8 {
        self.byte(addr)
    }

    fn read_u16(&mut self, addr: u32) -> u16 {
        u16::from_le_bytes(self.read_le(addr))
    }

    fn read_u32(&mut self, addr: u32) -> u32 {
        u32::from_le_bytes(self.read_le(addr))
    }

    fn write_u8(&mut self, addr: u32, val: u8) {
        *self.byte_mut(addr) = val;
    }

    fn write_u16(&mut self, addr: u32, val: u16) {
        self.write_le(addr, &val.to_le_bytes());
    }

    fn write_u32(&mut self, addr: u32, val: u32) {
        self.write_le(addr, &val.to_le_bytes());
    }

    fn write_bytes(&mut self, addr: u32, data: &[u8]) {
        self.write_le(addr, data);
    }
}
