use crate::opcode::Opcode;
use crate::operand::Operand;

/// One instruction: an opcode plus up to two operands (spec §3). `src` is
/// the AT&T first operand, `dst` the second — this mirrors the order
/// `ccasm` prints them in directly, so lowering code and printer never
/// disagree about which operand is which.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub op: Opcode,
    pub src: Operand,
    pub dst: Operand,
}

impl Instruction {
    pub fn zero(op: Opcode) -> Instruction {
        Instruction { op, src: Operand::Empty, dst: Operand::Empty }
    }

    pub fn one(op: Opcode, operand: Operand) -> Instruction {
        Instruction { op, src: operand, dst: Operand::Empty }
    }

    pub fn two(op: Opcode, src: Operand, dst: Operand) -> Instruction {
        Instruction { op, src, dst }
    }

    pub fn label(name: impl Into<String>) -> Instruction {
        Instruction::one(Opcode::Label, Operand::Label(name.into()))
    }
}
