//! ccasm — prints the `ccir` assembly IR as AT&T-syntax text (spec §4.5).

mod printer;

pub use printer::print;

#[cfg(test)]
mod tests {
    use super::*;
    use ccir::{Assembly, Instruction, Opcode, Operand, Register};

    #[test]
    fn prints_extern_then_data_then_text_sections() {
        let mut asm = Assembly::new();
        asm.intern_string("hi\\n");
        asm.section_mut("text").push(Instruction::label("main"));
        asm.section_mut("text").push(Instruction::zero(Opcode::Ret));
        let text = print(&asm);

        assert!(text.starts_with(".extern printf\n"));
        assert!(text.contains(".section .data\n"));
        assert!(text.contains(".LC0:\n    .string \"hi\\n\"\n"));
        assert!(text.contains(".section .text\n.globl main\n"));
        assert!(text.contains("main:\n"));
        assert!(text.contains("    ret\n"));
    }

    #[test]
    fn two_operand_instruction_prints_src_then_dst() {
        let mut asm = Assembly::new();
        asm.section_mut("text")
            .push(Instruction::two(Opcode::Mov, Operand::Immediate(5), Operand::reg(Register::R10)));
        let text = print(&asm);
        assert!(text.contains("    movq $5, %r10\n"));
    }

    #[test]
    fn memory_operand_omits_offset_when_zero() {
        let mut asm = Assembly::new();
        asm.section_mut("text")
            .push(Instruction::two(Opcode::Mov, Operand::mem(Register::Rbp, 0), Operand::reg(Register::Rax)));
        asm.section_mut("text")
            .push(Instruction::two(Opcode::Mov, Operand::mem(Register::Rbp, -8), Operand::reg(Register::Rax)));
        let text = print(&asm);
        assert!(text.contains("    movq (%rbp), %rax\n"));
        assert!(text.contains("    movq -8(%rbp), %rax\n"));
    }

    #[test]
    fn rip_label_and_plain_label_render_differently() {
        let mut asm = Assembly::new();
        asm.section_mut("text").push(Instruction::two(
            Opcode::Lea,
            Operand::RipLabel(".LC0".to_string()),
            Operand::reg(Register::R10),
        ));
        asm.section_mut("text").push(Instruction::one(Opcode::Call, Operand::Label("add".to_string())));
        let text = print(&asm);
        assert!(text.contains("    leaq .LC0(%rip), %r10\n"));
        assert!(text.contains("    call add\n"));
    }

    #[test]
    fn one_operand_instructions_never_print_a_comma() {
        let mut asm = Assembly::new();
        asm.section_mut("text").push(Instruction::one(Opcode::Push, Operand::reg(Register::R10)));
        asm.section_mut("text").push(Instruction::one(Opcode::SetEq, Operand::reg(Register::Al)));
        let text = print(&asm);
        assert!(text.contains("    pushq %r10\n"));
        assert!(text.contains("    sete %al\n"));
        assert!(!text.contains("pushq %r10,"));
    }

    #[test]
    fn end_to_end_division_and_call_compile_to_expected_mnemonics() {
        let arena = ccutil::Arena::new();
        let mut interner = ccutil::Interner::new();
        let src = r#"int main() { int a = 10; int b = 3; printf("%d\n", a / b); return 0; }"#;
        let tokens = cclex::tokenize(src).unwrap();
        let program = ccpar::parse(tokens, src, &arena, &mut interner).unwrap();
        let table = ccsem::analyze(&program, &mut interner).unwrap();
        let assembly = ccgen::generate(&program, &table, &interner).unwrap();
        let text = print(&assembly);

        assert!(text.contains("idivq"));
        assert!(text.contains("call printf"));
        assert!(text.contains(".extern printf\n"));
    }
}
