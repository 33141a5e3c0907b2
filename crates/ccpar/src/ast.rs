//! AST node definitions (spec §3 "AST node").
//!
//! Every node is allocated out of the shared [`ccutil::Arena`] for the
//! compilation and lives for the arena's lifetime `'a`; children and
//! sibling statements are owned references into the same arena. The two
//! node kinds sema annotates in place — `variable-decl` and `identifier`
//! — carry their stack offset in a `Cell` rather than a plain field, since
//! the arena hands out shared `&'a` references and sema mutates through
//! them after the parser has already returned the tree.

use std::cell::Cell;

use ccutil::{Span, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }
}

#[derive(Debug)]
pub enum Expr<'a> {
    IntLiteral { value: i64, span: Span },
    StringLiteral { value: String, span: Span },
    Identifier { name: Symbol, offset: Cell<Option<i32>>, span: Span },
    Binary { op: BinOp, left: &'a Expr<'a>, right: &'a Expr<'a>, span: Span },
    Call { name: Symbol, args: Vec<&'a Expr<'a>>, span: Span },
}

impl<'a> Expr<'a> {
    pub fn span(&self) -> Span {
        match self {
            Expr::IntLiteral { span, .. }
            | Expr::StringLiteral { span, .. }
            | Expr::Identifier { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }
}

/// Either branch an `if`'s tail may take after `else`: a nested `if`
/// (else-if chaining) or a plain block.
#[derive(Debug)]
pub enum ElseBranch<'a> {
    If(&'a Stmt<'a>),
    Block(Block<'a>),
}

#[derive(Debug)]
pub enum Stmt<'a> {
    VarDecl {
        ty: Symbol,
        name: Symbol,
        init: Option<&'a Expr<'a>>,
        offset: Cell<Option<i32>>,
        span: Span,
    },
    /// `target` is always an `Expr::Identifier`.
    Assign { target: &'a Expr<'a>, value: &'a Expr<'a>, span: Span },
    Return { value: &'a Expr<'a>, span: Span },
    If { cond: &'a Expr<'a>, then_branch: Block<'a>, else_branch: Option<ElseBranch<'a>>, span: Span },
    While { cond: &'a Expr<'a>, body: Block<'a>, span: Span },
    ExprStmt { value: &'a Expr<'a>, span: Span },
}

#[derive(Debug, Default)]
pub struct Block<'a> {
    pub stmts: Vec<&'a Stmt<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub ty: Symbol,
    pub name: Symbol,
}

#[derive(Debug)]
pub struct Function<'a> {
    pub name: Symbol,
    pub ret_type: Symbol,
    pub params: Vec<Param>,
    pub body: Block<'a>,
    pub span: Span,
}

#[derive(Debug, Default)]
pub struct Program<'a> {
    pub functions: Vec<&'a Function<'a>>,
}
