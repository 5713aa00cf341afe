//! Instruction Decode Properties.
//!
//! Verifies that `decode()` extracts register fields and sign-extended
//! immediates for every RV32IM format, and that it classifies encodings it
//! does not implement as `Unsupported`, `System` or `Illegal`.

use proptest::prelude::*;
use rstest::rstest;

use rv32sim_core::isa::decode::{
    branch_target, decode, imm_b, imm_i, imm_j, imm_s, imm_u, jalr_target, sign_extend,
};
use rv32sim_core::isa::instruction::{Instruction, InstructionBits};
use rv32sim_core::isa::ops::{AluOp, BranchCond, LoadWidth, StoreWidth};

use crate::common::InstructionBuilder as I;

// ──────────────────────────────────────────────────────────
// Field extraction
// ──────────────────────────────────────────────────────────

#[test]
fn fields_of_r_type() {
    // add a0, a1, a2
    let inst = 0x00C5_8533_u32;
    assert_eq!(inst.opcode(), 0x33);
    assert_eq!(inst.rd(), 10);
    assert_eq!(inst.rs1(), 11);
    assert_eq!(inst.rs2(), 12);
    assert_eq!(inst.funct3(), 0);
    assert_eq!(inst.funct7(), 0);
}

#[test]
fn fields_of_sub() {
    assert_eq!(0x40C5_8533_u32.funct7(), 0x20);
}

// ──────────────────────────────────────────────────────────
// Sign extension
// ──────────────────────────────────────────────────────────

#[test]
fn sign_extend_known_values() {
    assert_eq!(sign_extend(0xFFF, 12), -1);
    assert_eq!(sign_extend(0x800, 12), -2048);
    assert_eq!(sign_extend(0x7FF, 12), 2047);
    assert_eq!(sign_extend(0x1000, 13), -4096);
    assert_eq!(sign_extend(0x10_0000, 21), -(1 << 20));
    assert_eq!(sign_extend(0x8000_0000, 32), i32::MIN);
}

proptest! {
    #[test]
    fn sign_extend_negative_when_top_bit_set(bits in 1u32..32, low in any::<u32>()) {
        let top = 1u32 << (bits - 1);
        let val = (low & (top - 1)) | top;
        let expected = i64::from(val) - (1i64 << bits);
        prop_assert_eq!(i64::from(sign_extend(val, bits)), expected);
        prop_assert!(sign_extend(val, bits) < 0);
    }

    #[test]
    fn sign_extend_identity_when_top_bit_clear(bits in 1u32..32, low in any::<u32>()) {
        let val = low & ((1u32 << (bits - 1)) - 1);
        prop_assert_eq!(sign_extend(val, bits), val as i32);
    }

    #[test]
    fn i_immediate_round_trips(imm in -2048i32..2048) {
        let inst = I::new().addi(1, 2, imm).build();
        prop_assert_eq!(imm_i(inst), imm);
    }

    #[test]
    fn s_immediate_round_trips(imm in -2048i32..2048) {
        let inst = I::new().sw(2, 3, imm).build();
        prop_assert_eq!(imm_s(inst), imm);
    }

    #[test]
    fn b_immediate_round_trips(half in -2048i32..2048) {
        let imm = half * 2;
        let inst = I::new().beq(1, 2, imm).build();
        prop_assert_eq!(imm_b(inst), imm);
    }

    #[test]
    fn j_immediate_round_trips(half in -(1i32 << 19)..(1i32 << 19)) {
        let imm = half * 2;
        let inst = I::new().jal(1, imm).build();
        prop_assert_eq!(imm_j(inst), imm);
    }

    #[test]
    fn u_immediate_keeps_upper_bits(upper in 0u32..(1 << 20)) {
        let inst = I::new().lui(5, upper).build();
        prop_assert_eq!(imm_u(inst) as u32, upper << 12);
    }

    #[test]
    fn branch_target_is_wrapping_add(pc in any::<u32>(), half in -2048i32..2048) {
        let offset = half * 2;
        prop_assert_eq!(branch_target(pc, offset), (i64::from(pc) + i64::from(offset)) as u32);
    }

    #[test]
    fn jalr_target_clears_low_bit(base in any::<u32>(), offset in -2048i32..2048) {
        prop_assert_eq!(jalr_target(base, offset) & 1, 0);
    }
}

#[test]
fn branch_target_wraps_below_zero() {
    assert_eq!(branch_target(0, -4), 0xFFFF_FFFC);
    assert_eq!(branch_target(0xFFFF_FFFC, 8), 4);
}

// ──────────────────────────────────────────────────────────
// Decoded variants
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(I::new().add(10, 11, 12), AluOp::Add)]
#[case(I::new().sub(10, 11, 12), AluOp::Sub)]
#[case(I::new().sll(10, 11, 12), AluOp::Sll)]
#[case(I::new().slt(10, 11, 12), AluOp::Slt)]
#[case(I::new().sltu(10, 11, 12), AluOp::Sltu)]
#[case(I::new().xor(10, 11, 12), AluOp::Xor)]
#[case(I::new().srl(10, 11, 12), AluOp::Srl)]
#[case(I::new().sra(10, 11, 12), AluOp::Sra)]
#[case(I::new().or(10, 11, 12), AluOp::Or)]
#[case(I::new().and(10, 11, 12), AluOp::And)]
#[case(I::new().mul(10, 11, 12), AluOp::Mul)]
#[case(I::new().mulh(10, 11, 12), AluOp::Mulh)]
#[case(I::new().mulhsu(10, 11, 12), AluOp::Mulhsu)]
#[case(I::new().mulhu(10, 11, 12), AluOp::Mulhu)]
#[case(I::new().div(10, 11, 12), AluOp::Div)]
#[case(I::new().divu(10, 11, 12), AluOp::Divu)]
#[case(I::new().rem(10, 11, 12), AluOp::Rem)]
#[case(I::new().remu(10, 11, 12), AluOp::Remu)]
fn decodes_register_ops(#[case] builder: I, #[case] op: AluOp) {
    assert_eq!(
        decode(builder.build()),
        Instruction::Op {
            op,
            rd: 10,
            rs1: 11,
            rs2: 12
        }
    );
}

#[rstest]
#[case(I::new().addi(5, 6, -7), AluOp::Add, -7)]
#[case(I::new().slti(5, 6, -1), AluOp::Slt, -1)]
#[case(I::new().sltiu(5, 6, 100), AluOp::Sltu, 100)]
#[case(I::new().xori(5, 6, 0x7FF), AluOp::Xor, 0x7FF)]
#[case(I::new().ori(5, 6, -2048), AluOp::Or, -2048)]
#[case(I::new().andi(5, 6, 0xFF), AluOp::And, 0xFF)]
#[case(I::new().slli(5, 6, 31), AluOp::Sll, 31)]
#[case(I::new().srli(5, 6, 4), AluOp::Srl, 4)]
#[case(I::new().srai(5, 6, 4), AluOp::Sra, 4)]
fn decodes_immediate_ops(#[case] builder: I, #[case] op: AluOp, #[case] imm: i32) {
    assert_eq!(
        decode(builder.build()),
        Instruction::OpImm {
            op,
            rd: 5,
            rs1: 6,
            imm
        }
    );
}

#[test]
fn srai_is_selected_by_upper_bits_not_value() {
    // srli and srai with the same shift amount differ only in bit 30.
    let srli = I::new().srli(1, 1, 3).build();
    let srai = I::new().srai(1, 1, 3).build();
    assert_eq!(srli ^ srai, 1 << 30);
    assert!(matches!(decode(srai), Instruction::OpImm { op: AluOp::Sra, imm: 3, .. }));
}

#[rstest]
#[case(I::new().lb(1, 2, -1), LoadWidth::Byte)]
#[case(I::new().lh(1, 2, -1), LoadWidth::Half)]
#[case(I::new().lw(1, 2, -1), LoadWidth::Word)]
#[case(I::new().lbu(1, 2, -1), LoadWidth::ByteUnsigned)]
#[case(I::new().lhu(1, 2, -1), LoadWidth::HalfUnsigned)]
fn decodes_loads(#[case] builder: I, #[case] width: LoadWidth) {
    assert_eq!(
        decode(builder.build()),
        Instruction::Load {
            width,
            rd: 1,
            rs1: 2,
            offset: -1
        }
    );
}

#[rstest]
#[case(I::new().sb(2, 3, 40), StoreWidth::Byte)]
#[case(I::new().sh(2, 3, 40), StoreWidth::Half)]
#[case(I::new().sw(2, 3, 40), StoreWidth::Word)]
fn decodes_stores(#[case] builder: I, #[case] width: StoreWidth) {
    assert_eq!(
        decode(builder.build()),
        Instruction::Store {
            width,
            rs1: 2,
            rs2: 3,
            offset: 40
        }
    );
}

#[rstest]
#[case(I::new().beq(1, 2, -8), BranchCond::Eq)]
#[case(I::new().bne(1, 2, -8), BranchCond::Ne)]
#[case(I::new().blt(1, 2, -8), BranchCond::Lt)]
#[case(I::new().bge(1, 2, -8), BranchCond::Ge)]
#[case(I::new().bltu(1, 2, -8), BranchCond::Ltu)]
#[case(I::new().bgeu(1, 2, -8), BranchCond::Geu)]
fn decodes_branches(#[case] builder: I, #[case] cond: BranchCond) {
    let inst = decode(builder.build());
    assert!(inst.is_branch());
    assert_eq!(
        inst,
        Instruction::Branch {
            cond,
            rs1: 1,
            rs2: 2,
            offset: -8
        }
    );
}

#[test]
fn decodes_jumps_and_upper_immediates() {
    assert_eq!(
        decode(I::new().jal(1, 2048).build()),
        Instruction::Jal { rd: 1, offset: 2048 }
    );
    assert_eq!(
        decode(I::new().jalr(0, 1, 0).build()),
        Instruction::Jalr {
            rd: 0,
            rs1: 1,
            offset: 0
        }
    );
    assert_eq!(
        decode(I::new().lui(10, 0x12345).build()),
        Instruction::Lui {
            rd: 10,
            imm: 0x1234_5000
        }
    );
    assert_eq!(
        decode(I::new().auipc(10, 0xFFFFF).build()),
        Instruction::Auipc {
            rd: 10,
            imm: 0xFFFF_F000
        }
    );
}

#[test]
fn decodes_system_encodings() {
    assert_eq!(decode(0x0000_0073), Instruction::Ecall);
    // ebreak and a csrrw share the SYSTEM opcode but are not ecall.
    assert_eq!(
        decode(0x0010_0073),
        Instruction::System { raw: 0x0010_0073 }
    );
    assert_eq!(
        decode(0x3400_1073),
        Instruction::System { raw: 0x3400_1073 }
    );
}

#[rstest]
#[case::add_bad_funct7(I::new().add(1, 2, 3).funct7(0b0010000).build())]
#[case::slli_upper_bits(I::new().slli(1, 2, 3).build() | (1 << 30))]
#[case::srli_bad_upper_bits(I::new().srli(1, 2, 3).build() | (1 << 25))]
#[case::load_funct3_3(I::new().lw(1, 2, 0).funct3(3).build())]
#[case::load_funct3_6(I::new().lw(1, 2, 0).funct3(6).build())]
#[case::store_funct3_3(I::new().sw(1, 2, 0).funct3(3).build())]
#[case::branch_funct3_2(I::new().beq(1, 2, 8).funct3(2).build())]
#[case::branch_funct3_3(I::new().beq(1, 2, 8).funct3(3).build())]
fn unknown_funct_is_unsupported(#[case] inst: u32) {
    assert_eq!(decode(inst), Instruction::Unsupported { raw: inst });
    assert!(!decode(inst).is_branch());
}

#[rstest]
#[case(0x0000_0000)]
#[case(0xFFFF_FFFF)]
#[case(0x0000_0007)] // FLW
#[case(0x0000_002F)] // AMO
#[case(0x0000_001B)] // OP-IMM-32
fn unknown_opcode_is_illegal(#[case] inst: u32) {
    assert_eq!(decode(inst), Instruction::Illegal { raw: inst });
}
