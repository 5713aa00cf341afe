//! Instruction Execution Tests.
//!
//! Each test loads a short program into a fresh [`TestContext`], runs it and
//! checks registers, memory and the halt reason.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rv32sim_core::HaltReason;
use rv32sim_core::common::error::Fault;
use rv32sim_core::soc::Memory;

use crate::common::{InstructionBuilder as I, TestContext};

const A0: u32 = 10;
const A1: u32 = 11;
const A7: u32 = 17;

fn exit() -> [u32; 2] {
    [I::new().addi(A7, 0, 93).build(), I::new().ecall().build()]
}

fn program(body: &[u32]) -> Vec<u32> {
    let mut words = body.to_vec();
    words.extend(exit());
    words
}

#[test]
fn add_program_exits_with_sum() {
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[
            I::new().addi(A0, 0, 5).build(),
            I::new().addi(A1, 0, 3).build(),
            I::new().add(A0, A0, A1).build(),
        ]),
    );

    let reason = ctx.run();

    assert_eq!(reason, HaltReason::Exit { call: 93 });
    assert_eq!(ctx.get_reg(10), 8);
    assert_eq!(ctx.cpu.insns(), 5);
    assert_eq!(ctx.cpu.pc, 20, "pc advances past the exiting ecall");
}

#[test]
fn four_instruction_program_with_preloaded_a7() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().addi(A0, 0, 5).build(),
            I::new().addi(A1, 0, 3).build(),
            I::new().add(A0, A0, A1).build(),
            I::new().ecall().build(),
        ],
    );
    ctx.set_reg(17, 93);

    assert!(ctx.run().is_exit());
    assert_eq!(ctx.stats().insns, 4);
    assert_eq!(ctx.get_reg(10), 8);
}

#[test]
fn x0_stays_zero() {
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[
            I::new().addi(0, 0, 123).build(),
            I::new().lui(0, 0xFFFFF).build(),
            I::new().add(A0, 0, 0).build(),
        ]),
    );
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(10), 0);
}

#[rstest]
#[case::addi_negative(I::new().addi(A0, 0, -1), u32::MAX)]
#[case::slti(I::new().slti(A0, A1, 0), 1)]
#[case::sltiu_minus_one(I::new().sltiu(A0, A1, -1), 1)]
#[case::xori_not(I::new().xori(A0, A1, -1), 6)]
#[case::srai(I::new().srai(A0, A1, 1), 0xFFFF_FFFC)]
#[case::srli(I::new().srli(A0, A1, 28), 0xF)]
#[case::slli(I::new().slli(A0, A1, 4), 0xFFFF_FF90)]
#[case::lui(I::new().lui(A0, 0x12345), 0x1234_5000)]
fn immediate_forms(#[case] inst: I, #[case] expected: u32) {
    let mut ctx = TestContext::new().load_program(0, &program(&[inst.build()]));
    ctx.set_reg(11, (-7_i32) as u32);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(10), expected);
}

#[test]
fn auipc_adds_pc() {
    let mut ctx =
        TestContext::new().load_program(0x400, &program(&[I::new().auipc(A0, 0x1).build()]));
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(10), 0x1400);
}

#[test]
fn multiply_and_divide() {
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[
            I::new().mul(12, A0, A1).build(),
            I::new().div(13, A0, 0).build(),
            I::new().rem(14, A0, A1).build(),
            I::new().divu(15, A0, A1).build(),
        ]),
    );
    ctx.set_reg(10, (-20_i32) as u32);
    ctx.set_reg(11, 6);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(12), (-120_i32) as u32);
    assert_eq!(ctx.get_reg(13), u32::MAX);
    assert_eq!(ctx.get_reg(14), (-2_i32) as u32);
    assert_eq!(ctx.get_reg(15), 0xFFFF_FFEC / 6);
}

#[test]
fn loads_extend_by_width() {
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[
            I::new().lb(12, A0, 0).build(),
            I::new().lbu(13, A0, 0).build(),
            I::new().lh(14, A0, 0).build(),
            I::new().lhu(15, A0, 0).build(),
            I::new().lw(16, A0, 0).build(),
        ]),
    );
    ctx.memory.write_u32(0x1000, 0x1234_8081);
    ctx.set_reg(10, 0x1000);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(12), 0xFFFF_FF81);
    assert_eq!(ctx.get_reg(13), 0x81);
    assert_eq!(ctx.get_reg(14), 0xFFFF_8081);
    assert_eq!(ctx.get_reg(15), 0x8081);
    assert_eq!(ctx.get_reg(16), 0x1234_8081);
}

#[test]
fn stores_truncate_and_use_offsets() {
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[
            I::new().sw(A0, A1, 0).build(),
            I::new().sh(A0, A1, 4).build(),
            I::new().sb(A0, A1, -1).build(),
        ]),
    );
    ctx.set_reg(10, 0x2000);
    ctx.set_reg(11, 0xAABB_CCDD);
    let _ = ctx.run();
    assert_eq!(ctx.memory.read_u32(0x2000), 0xAABB_CCDD);
    assert_eq!(ctx.memory.read_u32(0x2004), 0x0000_CCDD);
    assert_eq!(ctx.memory.read_u8(0x1FFF), 0xDD);
    assert_eq!(ctx.memory.read_u8(0x1FFE), 0);
}

#[test]
fn unwritten_memory_reads_zero() {
    let mut ctx =
        TestContext::new().load_program(0, &program(&[I::new().lw(A0, 0, 0x7F0).build()]));
    ctx.set_reg(10, 0xFFFF_FFFF);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(10), 0);
}

#[test]
fn jal_links_and_jumps() {
    let mut ctx = TestContext::new().load_program(
        0x100,
        &[
            I::new().jal(1, 12).build(),
            I::new().addi(A0, 0, 1).build(),
            I::new().addi(A0, 0, 2).build(),
            I::new().addi(A7, 0, 93).build(),
            I::new().ecall().build(),
        ],
    );
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(1), 0x104);
    assert_eq!(ctx.get_reg(10), 0, "both addi instructions are skipped");
    assert_eq!(ctx.cpu.insns(), 3);
}

#[test]
fn jalr_uses_old_base_and_clears_low_bit() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().jalr(A0, A0, 1).build(),
            I::new().nop().build(),
            I::new().nop().build(),
            I::new().nop().build(),
            I::new().addi(A7, 0, 93).build(),
            I::new().ecall().build(),
        ],
    );
    ctx.set_reg(10, 16);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(10), 4, "rd gets the link address");
    assert_eq!(ctx.cpu.insns(), 3);
}

#[rstest]
#[case::beq_taken(I::new().beq(A0, A1, 8), 5, 5, true)]
#[case::beq_not_taken(I::new().beq(A0, A1, 8), 5, 6, false)]
#[case::bne(I::new().bne(A0, A1, 8), 5, 6, true)]
#[case::blt_signed(I::new().blt(A0, A1, 8), u32::MAX, 0, true)]
#[case::bltu_unsigned(I::new().bltu(A0, A1, 8), u32::MAX, 0, false)]
#[case::bge_equal(I::new().bge(A0, A1, 8), 3, 3, true)]
#[case::bgeu(I::new().bgeu(A0, A1, 8), 0, 1, false)]
fn branch_conditions(
    #[case] branch: I,
    #[case] a: u32,
    #[case] b: u32,
    #[case] taken: bool,
) {
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[branch.build(), I::new().addi(12, 0, 1).build()]),
    );
    ctx.set_reg(10, a);
    ctx.set_reg(11, b);
    let _ = ctx.step();
    let expected_pc = if taken { 8 } else { 4 };
    assert_eq!(ctx.cpu.pc, expected_pc);
}

#[test]
fn loop_feeds_the_predictors() {
    // a0 = 10; loop: a0 -= 1; bne a0, zero, loop
    let mut ctx = TestContext::new().load_program(
        0,
        &program(&[
            I::new().addi(A0, 0, 10).build(),
            I::new().addi(A0, A0, -1).build(),
            I::new().bne(A0, 0, -4).build(),
        ]),
    );
    let _ = ctx.run();
    let stats = ctx.stats();
    assert_eq!(stats.insns, 1 + 20 + 2);
    assert_eq!(stats.nt.predictions, 10);
    assert_eq!(stats.nt.mispredictions, 9);
    assert_eq!(stats.btfnt.mispredictions, 1);
    assert_eq!(stats.bimodal.len(), 4);
    assert!(stats.gshare.iter().all(|g| g.predictions == 10));
}

#[test]
fn illegal_opcode_faults_and_is_counted() {
    let mut ctx = TestContext::new().load_program(0, &[I::new().nop().build(), 0xFFFF_FFFF]);
    let reason = ctx.run();
    assert_eq!(
        reason,
        HaltReason::Fault(Fault::IllegalOpcode {
            word: 0xFFFF_FFFF,
            pc: 4
        })
    );
    assert_eq!(ctx.cpu.insns(), 2);
    assert_eq!(ctx.cpu.pc, 8);
}

#[test]
fn zero_word_is_illegal() {
    let mut ctx = TestContext::new();
    let reason = ctx.run();
    assert!(matches!(
        reason,
        HaltReason::Fault(Fault::IllegalOpcode { word: 0, pc: 0 })
    ));
}

#[test]
fn system_words_are_skipped() {
    // csrrs a0, cycle, zero followed by an exit.
    let mut ctx = TestContext::new().load_program(0, &program(&[0xC000_2573]));
    let reason = ctx.run();
    assert!(reason.is_exit());
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.cpu.insns(), 3);
}

#[test]
fn unsupported_encodings_are_skipped() {
    // OP opcode with funct7 = 0x7F.
    let unsupported = I::new().opcode(0x33).rd(A0).funct7(0x7F).build();
    let mut ctx = TestContext::new().load_program(0, &program(&[unsupported]));
    assert!(ctx.run().is_exit());
    assert_eq!(ctx.get_reg(10), 0);
}

#[test]
fn halted_cpu_repeats_reason() {
    let mut ctx = TestContext::new().load_program(0, &exit());
    let first = ctx.run();
    let insns = ctx.cpu.insns();
    let pc = ctx.cpu.pc;

    assert_eq!(ctx.step(), Some(first.clone()));
    assert_eq!(ctx.cpu.insns(), insns);
    assert_eq!(ctx.cpu.pc, pc);
    assert_eq!(ctx.cpu.halted(), Some(&first));
}

#[test]
fn stats_carry_halt_reason() {
    let mut ctx = TestContext::new().load_program(0, &exit());
    let _ = ctx.run();
    let stats = ctx.stats();
    assert_eq!(stats.halt, Some(HaltReason::Exit { call: 93 }));
    assert_eq!(stats.insns, 2);
}
