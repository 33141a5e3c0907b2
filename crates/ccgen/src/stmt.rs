//! Statement lowering (spec §4.4.3).

use ccir::{Instruction, Opcode, Operand, Register};
use ccpar::{Block, ElseBranch, Expr, Stmt};

use crate::codegen::Codegen;
use crate::context::CodegenContext;
use crate::error::CodegenError;

impl<'a> Codegen<'a> {
    /// Lowers every statement in `block` in order, stopping early the
    /// moment a statement guarantees control never falls through it
    /// (a `return`, or an `if` whose every branch returns).
    pub(crate) fn generate_block(&mut self, block: &Block) -> Result<bool, CodegenError> {
        for stmt in &block.stmts {
            if self.generate_stmt(stmt)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn generate_stmt(&mut self, stmt: &Stmt) -> Result<bool, CodegenError> {
        // Scratch registers never need to survive a statement boundary —
        // every named value lives on the stack between statements.
        match stmt {
            Stmt::VarDecl { init, offset, .. } => {
                if let Some(init) = init {
                    let mut ctx = CodegenContext::new();
                    let r = self.generate_expression(init, &mut ctx)?;
                    let off = offset.get().expect("sema assigns every local an offset");
                    self.push(Instruction::two(Opcode::Mov, Operand::reg(r.reg()), Operand::mem(Register::Rbp, off)));
                    ctx.free(r);
                }
                Ok(false)
            }
            Stmt::Assign { target, value, .. } => {
                let mut ctx = CodegenContext::new();
                self.generate_assignment(target, value, &mut ctx)?;
                Ok(false)
            }
            Stmt::Return { value, .. } => {
                let mut ctx = CodegenContext::new();
                let r = self.generate_expression(value, &mut ctx)?;
                self.push(Instruction::two(Opcode::Mov, Operand::reg(r.reg()), Operand::reg(Register::Rax)));
                ctx.free(r);
                self.emit_return();
                Ok(true)
            }
            Stmt::If { cond, then_branch, else_branch, .. } => self.generate_if(cond, then_branch, else_branch),
            Stmt::While { cond, body, .. } => self.generate_while(cond, body),
            Stmt::ExprStmt { value, .. } => {
                let mut ctx = CodegenContext::new();
                let r = self.generate_expression(value, &mut ctx)?;
                ctx.free(r);
                Ok(false)
            }
        }
    }

    fn generate_assignment(&mut self, target: &Expr, value: &Expr, ctx: &mut CodegenContext) -> Result<(), CodegenError> {
        let Expr::Identifier { offset, .. } = target else {
            return Err(CodegenError::AssignToNonIdentifier);
        };
        let r = self.generate_expression(value, ctx)?;
        let off = offset.get().expect("sema assigns every local an offset");
        self.push(Instruction::two(Opcode::Mov, Operand::reg(r.reg()), Operand::mem(Register::Rbp, off)));
        ctx.free(r);
        Ok(())
    }

    fn generate_if(&mut self, cond: &Expr, then_branch: &Block, else_branch: &Option<ElseBranch>) -> Result<bool, CodegenError> {
        let n = self.next_if_label();
        let else_label = format!(".Lelse{n}");
        let end_label = format!(".Lif_end{n}");

        let mut ctx = CodegenContext::new();
        let c = self.generate_expression(cond, &mut ctx)?;
        self.push(Instruction::two(Opcode::Cmp, Operand::Immediate(0), Operand::reg(c.reg())));
        ctx.free(c);
        self.push(Instruction::one(Opcode::Je, Operand::Label(else_label.clone())));

        let then_returns = self.generate_block(then_branch)?;
        if else_branch.is_some() {
            self.push(Instruction::one(Opcode::Jmp, Operand::Label(end_label.clone())));
        }

        self.push(Instruction::label(else_label));
        let else_returns = match else_branch {
            Some(ElseBranch::Block(block)) => self.generate_block(block)?,
            Some(ElseBranch::If(inner)) => self.generate_stmt(inner)?,
            None => false,
        };

        if else_branch.is_some() {
            self.push(Instruction::label(end_label));
        }

        Ok(then_returns && else_returns)
    }

    fn generate_while(&mut self, cond: &Expr, body: &Block) -> Result<bool, CodegenError> {
        let n = self.next_while_label();
        let start_label = format!(".Lwhile_start{n}");
        let end_label = format!(".Lwhile_end{n}");

        self.push(Instruction::label(start_label.clone()));
        let mut ctx = CodegenContext::new();
        let c = self.generate_expression(cond, &mut ctx)?;
        self.push(Instruction::two(Opcode::Cmp, Operand::Immediate(0), Operand::reg(c.reg())));
        ctx.free(c);
        self.push(Instruction::one(Opcode::Je, Operand::Label(end_label.clone())));

        self.generate_block(body)?;
        self.push(Instruction::one(Opcode::Jmp, Operand::Label(start_label)));
        self.push(Instruction::label(end_label));

        // A loop never guarantees termination of the enclosing block: the
        // condition may be false on entry, so control always potentially
        // falls through to here.
        Ok(false)
    }
}
