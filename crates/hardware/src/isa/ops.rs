//! Operation kinds carried by a decoded [`Instruction`](crate::isa::instruction::Instruction).
//!
//! 1. **ALU:** Integer and multiply/divide operations.
//! 2. **Memory:** Load widths with their extension rule and store widths.
//! 3. **Branch:** The six conditional-branch predicates.

/// ALU operation types for the RV32I and M instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Integer multiply (low bits).
    Mul,

    /// Integer multiply (high bits, signed × signed).
    Mulh,

    /// Integer multiply (high bits, signed × unsigned).
    Mulhsu,

    /// Integer multiply (high bits, unsigned × unsigned).
    Mulhu,

    /// Integer divide (signed).
    Div,

    /// Integer divide (unsigned).
    Divu,

    /// Integer remainder (signed).
    Rem,

    /// Integer remainder (unsigned).
    Remu,
}

impl AluOp {
    /// Mnemonic of the register-register form.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Mul => "mul",
            Self::Mulh => "mulh",
            Self::Mulhsu => "mulhsu",
            Self::Mulhu => "mulhu",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Rem => "rem",
            Self::Remu => "remu",
        }
    }

    /// Mnemonic of the register-immediate form, if one exists.
    pub const fn imm_mnemonic(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("addi"),
            Self::Sll => Some("slli"),
            Self::Slt => Some("slti"),
            Self::Sltu => Some("sltiu"),
            Self::Xor => Some("xori"),
            Self::Srl => Some("srli"),
            Self::Sra => Some("srai"),
            Self::Or => Some("ori"),
            Self::And => Some("andi"),
            _ => None,
        }
    }
}

/// Load access width and the extension applied when widening to 32 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadWidth {
    /// Signed byte (LB).
    Byte,
    /// Signed halfword (LH).
    Half,
    /// Word (LW).
    Word,
    /// Unsigned byte (LBU).
    ByteUnsigned,
    /// Unsigned halfword (LHU).
    HalfUnsigned,
}

impl LoadWidth {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Byte => "lb",
            Self::Half => "lh",
            Self::Word => "lw",
            Self::ByteUnsigned => "lbu",
            Self::HalfUnsigned => "lhu",
        }
    }
}

/// Store access width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreWidth {
    /// Byte (SB).
    Byte,
    /// Halfword (SH).
    Half,
    /// Word (SW).
    Word,
}

impl StoreWidth {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Byte => "sb",
            Self::Half => "sh",
            Self::Word => "sw",
        }
    }

    /// Truncates a register value to the store width.
    pub const fn truncate(self, val: u32) -> u32 {
        match self {
            Self::Byte => val & 0xFF,
            Self::Half => val & 0xFFFF,
            Self::Word => val,
        }
    }
}

/// Conditional branch predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchCond {
    /// Branch if equal.
    Eq,
    /// Branch if not equal.
    Ne,
    /// Branch if less than (signed).
    Lt,
    /// Branch if greater or equal (signed).
    Ge,
    /// Branch if less than (unsigned).
    Ltu,
    /// Branch if greater or equal (unsigned).
    Geu,
}

impl BranchCond {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Eq => "beq",
            Self::Ne => "bne",
            Self::Lt => "blt",
            Self::Ge => "bge",
            Self::Ltu => "bltu",
            Self::Geu => "bgeu",
        }
    }

    /// Evaluates the predicate on two register values.
    pub const fn evaluate(self, a: u32, b: u32) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => (a as i32) < (b as i32),
            Self::Ge => (a as i32) >= (b as i32),
            Self::Ltu => a < b,
            Self::Geu => a >= b,
        }
    }
}
