//! RISC-V System Opcodes.

/// System instruction opcode (0b1110011).
/// Shared by ECALL, EBREAK, CSR access and trap returns.
pub const OP_SYSTEM: u32 = 0b1110011;

/// Environment Call (ECALL).
pub const ECALL: u32 = 0x0000_0073;

/// Environment call number in `a7`: read one byte from the console into `a0`.
pub const SYS_GETCHAR: u32 = 1;

/// Environment call number in `a7`: write the low byte of `a0` to the console.
pub const SYS_PUTCHAR: u32 = 2;

/// Environment call number in `a7`: stop the simulation.
pub const SYS_EXIT: u32 = 3;

/// Linux-style `exit` call number, also accepted as a stop request.
pub const SYS_EXIT_LINUX: u32 = 93;

/// Value placed in `a0` when `SYS_GETCHAR` hits end of stream.
pub const GETCHAR_EOF: u32 = 0xFFFF_FFFF;
