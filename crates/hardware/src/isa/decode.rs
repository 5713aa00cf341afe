//! RISC-V Instruction Decoder.
//!
//! This module decodes 32-bit RV32IM encodings into the shared [`Instruction`]
//! variant. It extracts opcodes, register indices and function codes, and
//! handles the sign-extension of immediate values for all instruction formats
//! (I, S, B, U, J).
//!
//! The immediate helpers and [`branch_target`] / [`jalr_target`] are the only
//! place control-transfer arithmetic lives; the executor and the disassembler
//! both go through them.

use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::ops::{AluOp, BranchCond, LoadWidth, StoreWidth};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::{funct3 as m_f3, opcodes as m_op};

/// Bit shift for extracting I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
const I_IMM_SHIFT: u32 = 20;

/// Total number of bits in I-Type immediate (12 bits).
const I_IMM_BITS: u32 = 12;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Bit shift for combining S-Type immediate fields after extraction.
const S_IMM_COMBINED_SHIFT: u32 = 5;

/// Total number of bits in S-Type immediate (12 bits).
const S_IMM_BITS: u32 = 12;

/// Bit shift for extracting B-Type immediate bit 11 (bit 7 of instruction).
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_11_SHIFT: u32 = 7;

/// Bit shift for extracting B-Type immediate bits 4-1 (bits 8-11 of instruction).
const B_IMM_4_1_SHIFT: u32 = 8;

/// Bit mask for B-Type immediate bits 4-1 (4 bits).
const B_IMM_4_1_MASK: u32 = 0xF;

/// Bit shift for extracting B-Type immediate bits 10-5 (bits 25-30 of instruction).
const B_IMM_10_5_SHIFT: u32 = 25;

/// Bit mask for B-Type immediate bits 10-5 (6 bits).
const B_IMM_10_5_MASK: u32 = 0x3F;

/// Bit shift for extracting B-Type immediate bit 12 (bit 31 of instruction).
const B_IMM_12_SHIFT: u32 = 31;

/// Total number of bits in B-Type immediate (13 bits, sign-extended).
const B_IMM_BITS: u32 = 13;

/// Bit mask for U-Type immediate field (bits 12-31).
///
/// U-Type format: `imm[31:12] | rd | opcode`
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Bit shift for extracting J-Type immediate bits 19-12 (bits 12-19 of instruction).
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_IMM_19_12_SHIFT: u32 = 12;

/// Bit mask for J-Type immediate bits 19-12 (8 bits).
const J_IMM_19_12_MASK: u32 = 0xFF;

/// Bit shift for extracting J-Type immediate bit 11 (bit 20 of instruction).
const J_IMM_11_SHIFT: u32 = 20;

/// Bit shift for extracting J-Type immediate bits 10-1 (bits 21-30 of instruction).
const J_IMM_10_1_SHIFT: u32 = 21;

/// Bit mask for J-Type immediate bits 10-1 (10 bits).
const J_IMM_10_1_MASK: u32 = 0x3FF;

/// Bit shift for extracting J-Type immediate bit 20 (bit 31 of instruction).
const J_IMM_20_SHIFT: u32 = 31;

/// Total number of bits in J-Type immediate (21 bits, sign-extended).
const J_IMM_BITS: u32 = 21;

/// Decodes a RISC-V instruction into the shared [`Instruction`] variant.
///
/// Unrecognised funct3/funct7 combinations under a known opcode become
/// [`Instruction::Unsupported`]; unknown major opcodes become
/// [`Instruction::Illegal`].
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
pub fn decode(inst: u32) -> Instruction {
    let rd = inst.rd();
    let rs1 = inst.rs1();
    let rs2 = inst.rs2();
    let f3 = inst.funct3();

    match inst.opcode() {
        opcodes::OP_REG => decode_op_reg(inst),
        opcodes::OP_IMM => decode_op_imm(inst),

        opcodes::OP_LOAD => {
            let width = match f3 {
                funct3::LB => LoadWidth::Byte,
                funct3::LH => LoadWidth::Half,
                funct3::LW => LoadWidth::Word,
                funct3::LBU => LoadWidth::ByteUnsigned,
                funct3::LHU => LoadWidth::HalfUnsigned,
                _ => return Instruction::Unsupported { raw: inst },
            };
            Instruction::Load {
                width,
                rd,
                rs1,
                offset: imm_i(inst),
            }
        }

        opcodes::OP_STORE => {
            let width = match f3 {
                funct3::SB => StoreWidth::Byte,
                funct3::SH => StoreWidth::Half,
                funct3::SW => StoreWidth::Word,
                _ => return Instruction::Unsupported { raw: inst },
            };
            Instruction::Store {
                width,
                rs1,
                rs2,
                offset: imm_s(inst),
            }
        }

        opcodes::OP_BRANCH => {
            let cond = match f3 {
                funct3::BEQ => BranchCond::Eq,
                funct3::BNE => BranchCond::Ne,
                funct3::BLT => BranchCond::Lt,
                funct3::BGE => BranchCond::Ge,
                funct3::BLTU => BranchCond::Ltu,
                funct3::BGEU => BranchCond::Geu,
                _ => return Instruction::Unsupported { raw: inst },
            };
            Instruction::Branch {
                cond,
                rs1,
                rs2,
                offset: imm_b(inst),
            }
        }

        opcodes::OP_JAL => Instruction::Jal {
            rd,
            offset: imm_j(inst),
        },
        opcodes::OP_JALR => Instruction::Jalr {
            rd,
            rs1,
            offset: imm_i(inst),
        },
        opcodes::OP_LUI => Instruction::Lui {
            rd,
            imm: imm_u(inst) as u32,
        },
        opcodes::OP_AUIPC => Instruction::Auipc {
            rd,
            imm: imm_u(inst) as u32,
        },

        sys_op::OP_SYSTEM if inst == sys_op::ECALL => Instruction::Ecall,
        sys_op::OP_SYSTEM => Instruction::System { raw: inst },

        _ => Instruction::Illegal { raw: inst },
    }
}

/// Decodes `OP_REG`: the base R-type group and the M extension.
fn decode_op_reg(inst: u32) -> Instruction {
    let f3 = inst.funct3();
    let f7 = inst.funct7();

    let op = if f7 == m_op::M_EXTENSION {
        match f3 {
            m_f3::MUL => AluOp::Mul,
            m_f3::MULH => AluOp::Mulh,
            m_f3::MULHSU => AluOp::Mulhsu,
            m_f3::MULHU => AluOp::Mulhu,
            m_f3::DIV => AluOp::Div,
            m_f3::DIVU => AluOp::Divu,
            m_f3::REM => AluOp::Rem,
            _ => AluOp::Remu,
        }
    } else {
        match (f3, f7) {
            (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
            (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
            (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
            (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
            (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
            (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
            (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
            (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
            (funct3::OR, funct7::DEFAULT) => AluOp::Or,
            (funct3::AND, funct7::DEFAULT) => AluOp::And,
            _ => return Instruction::Unsupported { raw: inst },
        }
    };

    Instruction::Op {
        op,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
    }
}

/// Decodes `OP_IMM`. Shifts carry the 5-bit shift amount as their immediate;
/// SRLI and SRAI are told apart by the upper immediate bits, not the value.
fn decode_op_imm(inst: u32) -> Instruction {
    let (op, imm) = match inst.funct3() {
        funct3::ADD_SUB => (AluOp::Add, imm_i(inst)),
        funct3::SLT => (AluOp::Slt, imm_i(inst)),
        funct3::SLTU => (AluOp::Sltu, imm_i(inst)),
        funct3::XOR => (AluOp::Xor, imm_i(inst)),
        funct3::OR => (AluOp::Or, imm_i(inst)),
        funct3::AND => (AluOp::And, imm_i(inst)),
        funct3::SLL if inst.funct7() == funct7::DEFAULT => (AluOp::Sll, inst.shamt() as i32),
        funct3::SRL_SRA => match inst.funct7() {
            funct7::DEFAULT => (AluOp::Srl, inst.shamt() as i32),
            funct7::SRA => (AluOp::Sra, inst.shamt() as i32),
            _ => return Instruction::Unsupported { raw: inst },
        },
        _ => return Instruction::Unsupported { raw: inst },
    };

    Instruction::OpImm {
        op,
        rd: inst.rd(),
        rs1: inst.rs1(),
        imm,
    }
}

/// Decodes the immediate value for I-Type instructions.
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
/// Used for Load, JALR, and Immediate Arithmetic instructions.
pub const fn imm_i(inst: u32) -> i32 {
    sign_extend(inst >> I_IMM_SHIFT, I_IMM_BITS)
}

/// Decodes the immediate value for S-Type instructions.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
/// Used for Store instructions.
pub const fn imm_s(inst: u32) -> i32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    let combined = (high << S_IMM_COMBINED_SHIFT) | low;
    sign_extend(combined, S_IMM_BITS)
}

/// Decodes the immediate value for B-Type instructions.
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
/// The low bit is always zero, so branch targets have a granularity of 2.
pub const fn imm_b(inst: u32) -> i32 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & 1;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & 1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the immediate value for U-Type instructions.
///
/// U-Type format: `imm[31:12] | rd | opcode`
/// Already aligned: the low 12 bits are zero and bit 31 is the natural sign.
pub const fn imm_u(inst: u32) -> i32 {
    (inst & U_IMM_MASK) as i32
}

/// Decodes the immediate value for J-Type instructions.
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
pub const fn imm_j(inst: u32) -> i32 {
    let bits_19_12 = (inst >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
    let bit_11 = (inst >> J_IMM_11_SHIFT) & 1;
    let bits_10_1 = (inst >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
    let bit_20 = (inst >> J_IMM_20_SHIFT) & 1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Reinterprets the low `bits` of `val` as a two's-complement number.
///
/// When the sign bit (`1 << (bits - 1)`) is set, twice its value is
/// subtracted. `val` must not have bits set above `bits`; `bits` is in `1..=32`.
///
/// # Arguments
///
/// * `val` - The value to extend.
/// * `bits` - The number of valid bits in `val`.
pub const fn sign_extend(val: u32, bits: u32) -> i32 {
    let sign = 1_i64 << (bits - 1);
    let v = val as i64;
    if v & sign != 0 {
        (v - 2 * sign) as i32
    } else {
        v as i32
    }
}

/// Target of a PC-relative branch or jump: `pc + offset` with 32-bit wraparound.
#[inline]
pub const fn branch_target(pc: u32, offset: i32) -> u32 {
    pc.wrapping_add_signed(offset)
}

/// Target of a register-indirect jump: `base + offset` with bit 0 cleared.
#[inline]
pub const fn jalr_target(base: u32, offset: i32) -> u32 {
    base.wrapping_add_signed(offset) & !1
}
