//! Whole-program code generation (spec §4.4): walks each function once,
//! emitting its prologue, body, and (where reachable) epilogue into a single
//! `.text` section of an [`ccir::Assembly`].

use ccir::{Assembly, Instruction, Opcode, Operand, Register};
use ccpar::Program;
use ccsem::{Entry, SymbolTable};
use ccutil::{Interner, Symbol};

use crate::context::CodegenContext;
use crate::error::CodegenError;

pub struct Codegen<'a> {
    interner: &'a Interner,
    assembly: Assembly,
    if_counter: u32,
    while_counter: u32,
}

impl<'a> Codegen<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        Codegen { interner, assembly: Assembly::new(), if_counter: 0, while_counter: 0 }
    }

    pub fn generate(mut self, program: &Program, table: &SymbolTable) -> Result<Assembly, CodegenError> {
        for function in &program.functions {
            self.generate_function(function, table)?;
        }
        Ok(self.assembly)
    }

    fn generate_function(&mut self, function: &ccpar::Function, table: &SymbolTable) -> Result<(), CodegenError> {
        let Some(Entry::Function(entry)) = table.resolve(table.global(), function.name) else {
            return Err(CodegenError::UnhandledNode);
        };
        let frame_size = entry.frame_size;
        let locals = entry.locals;

        self.push(Instruction::label(self.resolve_name(function.name)));
        self.push(Instruction::one(Opcode::Push, Operand::reg(Register::Rbp)));
        self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rsp), Operand::reg(Register::Rbp)));
        if frame_size > 0 {
            self.push(Instruction::two(Opcode::Sub, Operand::Immediate(frame_size), Operand::reg(Register::Rsp)));
        }

        for (i, param) in function.params.iter().enumerate().take(6) {
            let Some(Entry::Variable(v)) = table.resolve(locals, param.name) else {
                return Err(CodegenError::UnhandledNode);
            };
            self.push(Instruction::two(
                Opcode::Mov,
                Operand::reg(Register::ARG_REGS[i]),
                Operand::mem(Register::Rbp, v.offset),
            ));
        }

        let terminated = self.generate_block(&function.body)?;
        if !terminated {
            self.emit_epilogue();
        }
        Ok(())
    }

    fn emit_epilogue(&mut self) {
        self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rbp), Operand::reg(Register::Rsp)));
        self.push(Instruction::one(Opcode::Pop, Operand::reg(Register::Rbp)));
        self.push(Instruction::zero(Opcode::Ret));
    }

    pub(crate) fn emit_return(&mut self) {
        self.emit_epilogue();
    }

    pub(crate) fn next_if_label(&mut self) -> u32 {
        self.if_counter += 1;
        self.if_counter
    }

    pub(crate) fn next_while_label(&mut self) -> u32 {
        self.while_counter += 1;
        self.while_counter
    }

    pub(crate) fn push(&mut self, instruction: Instruction) {
        self.assembly.section_mut("text").push(instruction);
    }

    pub(crate) fn intern_string(&mut self, raw: String) -> String {
        self.assembly.intern_string(raw)
    }

    pub(crate) fn resolve_name(&self, name: Symbol) -> String {
        self.interner.resolve(name).to_string()
    }
}
