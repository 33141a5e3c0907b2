//! Renders an [`ccir::Assembly`] as System-V AMD64 AT&T-syntax text
//! (spec §4.5), grounded on the original compiler's `print_assembly` /
//! `print_instruction` / `print_operand` (`codegen.h`), generalized past its
//! single hard-coded `main` function and `format` string.

use std::fmt::Write as _;

use ccir::{Assembly, Instruction, Opcode, Operand, Register};

fn register_name(register: Register) -> &'static str {
    match register {
        Register::Rax => "rax",
        Register::Rbx => "rbx",
        Register::Rcx => "rcx",
        Register::Rdx => "rdx",
        Register::Rsp => "rsp",
        Register::Rbp => "rbp",
        Register::Rdi => "rdi",
        Register::Rsi => "rsi",
        Register::R8 => "r8",
        Register::R9 => "r9",
        Register::R10 => "r10",
        Register::R11 => "r11",
        Register::R12 => "r12",
        Register::R13 => "r13",
        Register::R14 => "r14",
        Register::R15 => "r15",
        Register::Al => "al",
    }
}

fn mnemonic(op: Opcode) -> &'static str {
    match op {
        Opcode::Mov => "movq",
        Opcode::Add => "addq",
        Opcode::Sub => "subq",
        Opcode::Mul => "imulq",
        Opcode::Div => "idivq",
        Opcode::Push => "pushq",
        Opcode::Pop => "popq",
        Opcode::Call => "call",
        Opcode::Ret => "ret",
        Opcode::Lea => "leaq",
        Opcode::Cmp => "cmpq",
        Opcode::SetEq => "sete",
        Opcode::SetNe => "setne",
        Opcode::Movzx => "movzbq",
        Opcode::Je => "je",
        Opcode::Jmp => "jmp",
        Opcode::Label => unreachable!("labels are printed separately, never through `mnemonic`"),
    }
}

fn format_operand(operand: &Operand) -> String {
    match operand {
        Operand::Empty => String::new(),
        Operand::Register(r) => format!("%{}", register_name(*r)),
        Operand::Immediate(n) => format!("${n}"),
        Operand::Memory { base, offset } => {
            if *offset != 0 {
                format!("{offset}(%{})", register_name(*base))
            } else {
                format!("(%{})", register_name(*base))
            }
        }
        Operand::Label(name) => name.clone(),
        Operand::RipLabel(name) => format!("{name}(%rip)"),
    }
}

fn write_instruction(out: &mut String, instr: &Instruction) {
    if let Opcode::Label = instr.op {
        let Operand::Label(name) = &instr.src else {
            unreachable!("a Label instruction always carries a Label operand");
        };
        let _ = writeln!(out, "{name}:");
        return;
    }

    if instr.dst.is_empty() {
        if matches!(instr.op, Opcode::Ret) {
            let _ = writeln!(out, "    {}", mnemonic(instr.op));
        } else {
            let _ = writeln!(out, "    {} {}", mnemonic(instr.op), format_operand(&instr.src));
        }
    } else {
        let _ = writeln!(out, "    {} {}, {}", mnemonic(instr.op), format_operand(&instr.src), format_operand(&instr.dst));
    }
}

/// Renders the whole translation unit: extern declarations, the data
/// section (one label + `.string` per interned literal), then the text
/// section with every instruction from every section in order.
pub fn print(assembly: &Assembly) -> String {
    let mut out = String::new();

    for symbol in &assembly.externs {
        let _ = writeln!(out, ".extern {symbol}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, ".section .data");
    for literal in &assembly.strings {
        let _ = writeln!(out, "{}:", literal.label);
        let _ = writeln!(out, "    .string \"{}\"", literal.value);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, ".section .text");
    let _ = writeln!(out, ".globl main");

    for section in &assembly.sections {
        for instr in &section.instructions {
            write_instruction(&mut out, instr);
        }
    }

    out
}
