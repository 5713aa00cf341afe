//! Main Execution Loop.
//!
//! This module implements the fetch-decode-execute cycle of the CPU. It performs the following:
//! 1. **Fetch and Decode:** Reads the word at PC and decodes it once into an [`Instruction`].
//! 2. **Execution:** Applies the instruction's semantics to registers, memory and PC.
//! 3. **Branch Prediction:** Scores every predictor model on each conditional branch.
//! 4. **Environment Calls:** Services console I/O and exit requests.
//! 5. **Observability:** Feeds the execution trace and reports faults through `tracing`.

use super::{Cpu, Env, HaltReason};
use crate::common::error::Fault;
use crate::core::units::alu::Alu;
use crate::isa::abi;
use crate::isa::decode::{branch_target, decode, jalr_target};
use crate::isa::disasm;
use crate::isa::instruction::Instruction;
use crate::isa::ops::{LoadWidth, StoreWidth};
use crate::isa::privileged::opcodes as sys_ops;

/// Result of executing one instruction, before it retires.
#[derive(Debug)]
struct Outcome {
    next_pc: u32,
    taken: bool,
    halt: Option<HaltReason>,
}

impl Cpu {
    /// Executes exactly one instruction.
    ///
    /// The instruction is counted even when it halts the CPU. Once halted,
    /// further calls do nothing and return the stored reason.
    ///
    /// # Returns
    ///
    /// `Some(reason)` if the CPU is halted after this step.
    pub fn step(&mut self, env: &mut Env<'_>) -> Option<HaltReason> {
        if let Some(reason) = &self.halted {
            return Some(reason.clone());
        }

        let pc = self.pc;
        let word = env.memory.read_u32(pc);
        self.insns += 1;

        let inst = decode(word);
        let text = if env.trace.enabled() {
            disasm::render(pc, &inst, env.symbols)
        } else {
            String::new()
        };

        let outcome = self.execute(pc, inst, env);

        self.regs.clear_zero();
        env.trace.retire(self.insns, pc, word, &text, outcome.taken);
        self.pc = outcome.next_pc;

        if outcome.halt.is_some() {
            self.halted.clone_from(&outcome.halt);
        }
        outcome.halt
    }

    /// Steps until the CPU halts.
    ///
    /// There is no instruction limit; a program that never exits runs forever.
    pub fn run(&mut self, env: &mut Env<'_>) -> HaltReason {
        loop {
            if let Some(reason) = self.step(env) {
                return reason;
            }
        }
    }

    fn execute(&mut self, pc: u32, inst: Instruction, env: &mut Env<'_>) -> Outcome {
        let mut out = Outcome {
            next_pc: pc.wrapping_add(4),
            taken: false,
            halt: None,
        };

        match inst {
            Instruction::Op { op, rd, rs1, rs2 } => {
                let val = Alu::execute(op, self.regs.read(rs1), self.regs.read(rs2));
                self.write_reg(env, rd, val);
            }
            Instruction::OpImm { op, rd, rs1, imm } => {
                let val = Alu::execute(op, self.regs.read(rs1), imm as u32);
                self.write_reg(env, rd, val);
            }
            Instruction::Load {
                width,
                rd,
                rs1,
                offset,
            } => {
                let addr = self.regs.read(rs1).wrapping_add_signed(offset);
                let val = match width {
                    LoadWidth::Byte => env.memory.read_u8(addr) as i8 as i32 as u32,
                    LoadWidth::Half => env.memory.read_u16(addr) as i16 as i32 as u32,
                    LoadWidth::Word => env.memory.read_u32(addr),
                    LoadWidth::ByteUnsigned => u32::from(env.memory.read_u8(addr)),
                    LoadWidth::HalfUnsigned => u32::from(env.memory.read_u16(addr)),
                };
                self.write_reg(env, rd, val);
            }
            Instruction::Store {
                width,
                rs1,
                rs2,
                offset,
            } => {
                let addr = self.regs.read(rs1).wrapping_add_signed(offset);
                let val = width.truncate(self.regs.read(rs2));
                match width {
                    StoreWidth::Byte => env.memory.write_u8(addr, val as u8),
                    StoreWidth::Half => env.memory.write_u16(addr, val as u16),
                    StoreWidth::Word => env.memory.write_u32(addr, val),
                }
                env.trace.memory_write(addr, val);
            }
            Instruction::Branch {
                cond,
                rs1,
                rs2,
                offset,
            } => {
                let target = branch_target(pc, offset);
                let taken = cond.evaluate(self.regs.read(rs1), self.regs.read(rs2));
                self.bank.record(pc, target, taken);
                if taken {
                    out.next_pc = target;
                    out.taken = true;
                }
            }
            Instruction::Jal { rd, offset } => {
                self.write_reg(env, rd, pc.wrapping_add(4));
                out.next_pc = branch_target(pc, offset);
            }
            Instruction::Jalr { rd, rs1, offset } => {
                // Target first: rd may equal rs1.
                let target = jalr_target(self.regs.read(rs1), offset);
                self.write_reg(env, rd, pc.wrapping_add(4));
                out.next_pc = target;
            }
            Instruction::Lui { rd, imm } => self.write_reg(env, rd, imm),
            Instruction::Auipc { rd, imm } => self.write_reg(env, rd, pc.wrapping_add(imm)),
            Instruction::Ecall => out.halt = self.ecall(pc, env),
            Instruction::System { raw } => {
                tracing::warn!("Unhandled system instruction {raw:#010x} at {pc:#010x}, skipped");
            }
            Instruction::Unsupported { raw } => {
                tracing::debug!("Unsupported encoding {raw:#010x} at {pc:#010x}, skipped");
            }
            Instruction::Illegal { raw } => {
                let fault = Fault::IllegalOpcode { word: raw, pc };
                tracing::error!("{fault}");
                out.halt = Some(HaltReason::Fault(fault));
            }
        }

        out
    }

    /// Services an environment call selected by `a7`.
    fn ecall(&mut self, pc: u32, env: &mut Env<'_>) -> Option<HaltReason> {
        let call = self.regs.read(abi::REG_A7);
        match call {
            sys_ops::SYS_GETCHAR => {
                let val = env
                    .console
                    .read_byte()
                    .map_or(sys_ops::GETCHAR_EOF, u32::from);
                self.regs.write(abi::REG_A0, val);
                None
            }
            sys_ops::SYS_PUTCHAR => {
                env.console.write_byte((self.regs.read(abi::REG_A0) & 0xFF) as u8);
                None
            }
            sys_ops::SYS_EXIT | sys_ops::SYS_EXIT_LINUX => {
                tracing::debug!(call, pc, "exit requested");
                Some(HaltReason::Exit { call })
            }
            _ => {
                let fault = Fault::UnhandledEcall { call, pc };
                tracing::error!("{fault}");
                Some(HaltReason::Fault(fault))
            }
        }
    }

    fn write_reg(&mut self, env: &mut Env<'_>, rd: usize, val: u32) {
        self.regs.write(rd, val);
        env.trace.register_write(rd, val);
    }
}
