//! Memory trait for the simulated address space.
//!
//! This module defines the `Memory` trait the executor fetches, loads and
//! stores through. It provides:
//! 1. **Access:** Byte, half and word read/write at 32-bit addresses.
//! 2. **Bulk load:** A default byte-wise `write_bytes` used by the loader.
//!
//! No alignment or bounds contract is imposed; what a misaligned or unmapped
//! access does is up to the implementor.

/// Byte-addressable, little-endian 32-bit address space.
pub trait Memory {
    /// Reads one byte.
    fn read_u8(&mut self, addr: u32) -> u8;
    /// Reads two bytes (little-endian).
    fn read_u16(&mut self, addr: u32) -> u16;
    /// Reads four bytes (little-endian).
    fn read_u32(&mut self, addr: u32) -> u32;
    /// Writes one byte.
    fn write_u8(&mut self, addr: u32, val: u8);
    /// Writes two bytes (little-endian).
    fn write_u16(&mut self, addr: u32, val: u16);
    /// Writes four bytes (little-endian).
    fn write_u32(&mut self, addr: u32, val: u32);

    /// Writes a contiguous byte slice starting at `addr` (default: byte-by-byte).
    ///
    /// Addresses wrap at the top of the 32-bit space.
    fn write_bytes(&mut self, addr: u32, data: &[u8]) {
        let mut cursor = addr;
        for byte in data {
            self.write_u8(cursor, *byte);
            cursor = cursor.wrapping_add(1);
        }
    }
}
