//! Expression lowering (spec §4.4.2): `generate_expression` recursively
//! lowers an expression tree to a sequence of instructions, returning the
//! scratch register holding the result.

use ccir::{Instruction, Opcode, Operand, Register};
use ccpar::{BinOp, Expr};

use crate::codegen::Codegen;
use crate::context::{CodegenContext, Temp};
use crate::error::CodegenError;

impl<'a> Codegen<'a> {
    /// Lowers `expr`, emitting instructions into the current function's
    /// text section and returning the scratch register holding the result.
    /// Variable and parameter offsets are read straight off the AST (sema
    /// already annotated every `Identifier` and `VarDecl` in place), so no
    /// symbol table lookup is needed here.
    pub(crate) fn generate_expression(&mut self, expr: &Expr, ctx: &mut CodegenContext) -> Result<Temp, CodegenError> {
        match expr {
            Expr::IntLiteral { value, .. } => {
                let r = ctx.allocate()?;
                self.push(Instruction::two(Opcode::Mov, Operand::Immediate(*value), Operand::reg(r.reg())));
                Ok(r)
            }
            Expr::Identifier { offset, .. } => {
                let r = ctx.allocate()?;
                let off = offset.get().expect("sema resolves every identifier before codegen");
                self.push(Instruction::two(Opcode::Mov, Operand::mem(Register::Rbp, off), Operand::reg(r.reg())));
                Ok(r)
            }
            Expr::StringLiteral { value, .. } => {
                let label = self.intern_string(value.clone());
                let r = ctx.allocate()?;
                self.push(Instruction::two(Opcode::Lea, Operand::RipLabel(label), Operand::reg(r.reg())));
                Ok(r)
            }
            Expr::Binary { op, left, right, .. } => {
                let l = self.generate_expression(left, ctx)?;
                let r = self.generate_expression(right, ctx)?;
                self.generate_binary(*op, l, r, ctx)
            }
            Expr::Call { name, args, .. } => self.generate_call(*name, args, ctx),
        }
    }

    fn generate_binary(&mut self, op: BinOp, l: Temp, r: Temp, ctx: &mut CodegenContext) -> Result<Temp, CodegenError> {
        match op {
            BinOp::Add => {
                self.push(Instruction::two(Opcode::Add, Operand::reg(r.reg()), Operand::reg(l.reg())));
                ctx.free(r);
                Ok(l)
            }
            BinOp::Sub => {
                self.push(Instruction::two(Opcode::Sub, Operand::reg(r.reg()), Operand::reg(l.reg())));
                ctx.free(r);
                Ok(l)
            }
            BinOp::Mul => {
                // Two-operand `imulq src, dst` (spec §9 Design Notes / Open Questions).
                self.push(Instruction::two(Opcode::Mul, Operand::reg(r.reg()), Operand::reg(l.reg())));
                ctx.free(r);
                Ok(l)
            }
            BinOp::Eq | BinOp::Ne => {
                self.push(Instruction::two(Opcode::Cmp, Operand::reg(r.reg()), Operand::reg(l.reg())));
                let set_op = if op == BinOp::Eq { Opcode::SetEq } else { Opcode::SetNe };
                self.push(Instruction::one(set_op, Operand::reg(Register::Al)));
                ctx.free(l);
                ctx.free(r);
                let out = ctx.allocate()?;
                self.push(Instruction::two(Opcode::Movzx, Operand::reg(Register::Al), Operand::reg(out.reg())));
                Ok(out)
            }
            BinOp::Div => self.generate_division(l, r, ctx),
        }
    }

    /// Implements the `IDIV` protocol on `RDX:RAX` exactly per spec §4.4.2.
    fn generate_division(&mut self, l: Temp, mut r: Temp, ctx: &mut CodegenContext) -> Result<Temp, CodegenError> {
        // 1. Evict an unrelated live occupant of RDX.
        if let Some(occupant) = ctx.owner_of(Register::Rdx) {
            if occupant.reg() != l.reg() && occupant.reg() != r.reg() {
                let spare = ctx.find_free_register()?;
                self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rdx), Operand::reg(spare)));
                ctx.retarget(Register::Rdx, spare, occupant);
            }
        }

        // 2. If L == RDX: move it to RAX.
        let l = if l.reg() == Register::Rdx {
            self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rdx), Operand::reg(Register::Rax)));
            ctx.free(l.clone());
            l.relocate(Register::Rax);
            l
        } else {
            l
        };

        // 3. If R == RDX: move it to a fresh scratch register.
        if r.reg() == Register::Rdx {
            let t = ctx.allocate()?;
            self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rdx), Operand::reg(t.reg())));
            ctx.free(r.clone());
            r = t;
        }

        // 4. Get the dividend into RAX.
        if l.reg() != Register::Rax {
            self.push(Instruction::two(Opcode::Mov, Operand::reg(l.reg()), Operand::reg(Register::Rax)));
        }
        ctx.free(l);

        // 5. Zero-extend into RDX (all values are treated as signed; this
        //    form only zero-extends non-negative dividends, per spec §9).
        self.push(Instruction::two(Opcode::Mov, Operand::Immediate(0), Operand::reg(Register::Rdx)));

        // 6. IDIV by R.
        self.push(Instruction::one(Opcode::Div, Operand::reg(r.reg())));
        ctx.free(r);

        // 7. Quotient is in RAX; move it into a fresh scratch register.
        let q = ctx.allocate()?;
        self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rax), Operand::reg(q.reg())));
        Ok(q)
    }

    fn generate_call(&mut self, name: ccutil::Symbol, args: &[&Expr], ctx: &mut CodegenContext) -> Result<Temp, CodegenError> {
        // 1. Save every currently live scratch register around the call.
        let live: Vec<Register> = Register::SCRATCH_POOL.iter().copied().filter(|r| ctx.is_live(*r)).collect();
        for r in &live {
            self.push(Instruction::one(Opcode::Push, Operand::reg(*r)));
        }
        let snapshot = ctx.take_snapshot();

        // 2. Lower each argument, reserving its argreg so later arguments
        //    don't clobber it.
        for (i, arg) in args.iter().enumerate().take(6) {
            let r = self.generate_expression(arg, ctx)?;
            self.push(Instruction::two(Opcode::Mov, Operand::reg(r.reg()), Operand::reg(Register::ARG_REGS[i])));
            ctx.free(r);
            ctx.reserve(Register::ARG_REGS[i]);
        }

        // 3. AL-zero convention ahead of a (possibly variadic) call.
        self.push(Instruction::two(Opcode::Mov, Operand::Immediate(0), Operand::reg(Register::Rax)));

        // 4. Call.
        let target = self.resolve_name(name);
        self.push(Instruction::one(Opcode::Call, Operand::Label(target)));

        // 5. Restore scratch state and pop saved registers in reverse order.
        ctx.restore_snapshot(snapshot);
        for r in live.iter().rev() {
            self.push(Instruction::one(Opcode::Pop, Operand::reg(*r)));
        }

        // 6. Capture the return value.
        let result = ctx.allocate()?;
        self.push(Instruction::two(Opcode::Mov, Operand::reg(Register::Rax), Operand::reg(result.reg())));
        Ok(result)
    }
}
