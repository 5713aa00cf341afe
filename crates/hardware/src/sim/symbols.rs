//! Address-to-name lookup for the disassembler.
//!
//! Symbols are cosmetic: they only add a ` <name>` suffix to branch and jump
//! targets in disassembly and never influence execution.

use std::collections::BTreeMap;

/// Resolves an address to a symbol name.
pub trait SymbolTable {
    /// Returns the name of the symbol starting exactly at `addr`.
    fn lookup(&self, addr: u32) -> Option<&str>;
}

/// Symbol table backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Symbols {
    by_addr: BTreeMap<u32, String>,
}

impl Symbols {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the name at `addr`.
    pub fn insert(&mut self, addr: u32, name: impl Into<String>) {
        let _ = self.by_addr.insert(addr, name.into());
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.by_addr.len()
    }

    /// Returns `true` if no symbols are known.
    pub fn is_empty(&self) -> bool {
        self.by_addr.is_empty()
    }

    /// Finds the address of a symbol by name.
    pub fn address_of(&self, name: &str) -> Option<u32> {
        self.by_addr
            .iter()
            .find_map(|(addr, n)| (n == name).then_some(*addr))
    }

    /// Iterates over `(address, name)` pairs in address order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str)> {
        self.by_addr.iter().map(|(a, n)| (*a, n.as_str()))
    }
}

impl SymbolTable for Symbols {
    fn lookup(&self, addr: u32) -> Option<&str> {
        self.by_addr.get(&addr).map(String::as_str)
    }
}

impl FromIterator<(u32, String)> for Symbols {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            by_addr: iter.into_iter().collect(),
        }
    }
}
