//! ccir — the assembly intermediate representation `ccgen` builds and
//! `ccasm` prints (spec §3 "Assembly IR").

mod assembly;
mod instruction;
mod opcode;
mod operand;
mod register;
mod section;

pub use assembly::{Assembly, StringLiteral};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::Operand;
pub use register::Register;
pub use section::Section;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assembly_always_declares_printf_extern() {
        let asm = Assembly::new();
        assert_eq!(asm.externs, vec!["printf".to_string()]);
        assert!(asm.sections.is_empty());
        assert!(asm.strings.is_empty());
    }

    #[test]
    fn string_interning_assigns_sequential_labels_without_dedup() {
        let mut asm = Assembly::new();
        let a = asm.intern_string("hello\\n");
        let b = asm.intern_string("hello\\n");
        assert_eq!(a, ".LC0");
        assert_eq!(b, ".LC1");
        assert_eq!(asm.strings.len(), 2);
    }

    #[test]
    fn section_mut_creates_then_reuses_by_name() {
        let mut asm = Assembly::new();
        asm.section_mut("text").push(Instruction::label("main"));
        asm.section_mut("text").push(Instruction::zero(Opcode::Ret));
        assert_eq!(asm.sections.len(), 1);
        assert_eq!(asm.sections[0].instructions.len(), 2);
    }
}
