//! Instruction Disassembler for RV32IM.
//!
//! Converts a 32-bit instruction encoding into a mnemonic string for the
//! execution trace and for diagnostics. The text is rendered from the same
//! [`Instruction`] variant the executor runs, so immediates and branch
//! targets can never disagree between the two.
//!
//! # Usage
//!
//! ```
//! use rv32sim_core::isa::disasm::disassemble;
//! let text = disassemble(0, 0x00550513, None); // ADDI x10, x10, 5
//! assert_eq!(text, "addi a0,a0,5");
//! ```

use crate::isa::abi::reg_name as xreg;
use crate::isa::decode::{branch_target, decode};
use crate::isa::instruction::Instruction;
use crate::sim::symbols::SymbolTable;

/// Text rendered for any encoding the simulator does not implement.
pub const UNKNOWN: &str = "unknown";

/// Disassembles a 32-bit RV32IM instruction located at `addr`.
///
/// Branch and jump targets are printed as absolute addresses. When a symbol
/// table names the target, ` <name>` is appended.
///
/// # Arguments
///
/// * `addr` - Address the instruction was fetched from.
/// * `inst` - The raw 32-bit instruction encoding.
/// * `symbols` - Optional address-to-name lookup.
pub fn disassemble(addr: u32, inst: u32, symbols: Option<&dyn SymbolTable>) -> String {
    render(addr, &decode(inst), symbols)
}

/// Disassembles into a caller-provided byte buffer.
///
/// The text is truncated to `buf.len() - 1` bytes and always followed by a
/// NUL byte. A zero-length buffer is left untouched. Returns the number of
/// text bytes written, excluding the terminator.
pub fn disassemble_into(
    addr: u32,
    inst: u32,
    buf: &mut [u8],
    symbols: Option<&dyn SymbolTable>,
) -> usize {
    let Some(capacity) = buf.len().checked_sub(1) else {
        return 0;
    };
    let text = disassemble(addr, inst, symbols);
    let len = text.len().min(capacity);
    buf[..len].copy_from_slice(&text.as_bytes()[..len]);
    buf[len] = 0;
    len
}

/// Renders an already decoded instruction.
pub fn render(addr: u32, inst: &Instruction, symbols: Option<&dyn SymbolTable>) -> String {
    match *inst {
        Instruction::Op { op, rd, rs1, rs2 } => {
            format!("{} {},{},{}", op.mnemonic(), xreg(rd), xreg(rs1), xreg(rs2))
        }
        Instruction::OpImm { op, rd, rs1, imm } => match op.imm_mnemonic() {
            Some(mn) => format!("{mn} {},{},{imm}", xreg(rd), xreg(rs1)),
            None => UNKNOWN.to_string(),
        },
        Instruction::Load {
            width,
            rd,
            rs1,
            offset,
        } => format!("{} {},{offset}({})", width.mnemonic(), xreg(rd), xreg(rs1)),
        Instruction::Store {
            width,
            rs1,
            rs2,
            offset,
        } => format!("{} {},{offset}({})", width.mnemonic(), xreg(rs2), xreg(rs1)),
        Instruction::Branch {
            cond,
            rs1,
            rs2,
            offset,
        } => {
            let target = branch_target(addr, offset);
            let text = format!("{} {},{},{target:#010x}", cond.mnemonic(), xreg(rs1), xreg(rs2));
            with_symbol(text, target, symbols)
        }
        Instruction::Jal { rd, offset } => {
            let target = branch_target(addr, offset);
            with_symbol(format!("jal {},{target:#010x}", xreg(rd)), target, symbols)
        }
        Instruction::Jalr { rd, rs1, offset } => {
            format!("jalr {},{offset}({})", xreg(rd), xreg(rs1))
        }
        Instruction::Lui { rd, imm } => format!("lui {},{:#x}", xreg(rd), imm >> 12),
        Instruction::Auipc { rd, imm } => format!("auipc {},{:#x}", xreg(rd), imm >> 12),
        Instruction::Ecall => "ecall".to_string(),
        Instruction::System { .. } | Instruction::Unsupported { .. } | Instruction::Illegal { .. } => {
            UNKNOWN.to_string()
        }
    }
}

/// Appends ` <name>` when the symbol table resolves `target`.
fn with_symbol(text: String, target: u32, symbols: Option<&dyn SymbolTable>) -> String {
    match symbols.and_then(|s| s.lookup(target)) {
        Some(name) => format!("{text} <{name}>"),
        None => text,
    }
}
