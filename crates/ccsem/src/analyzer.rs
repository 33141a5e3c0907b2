//! Walks the parsed program once, resolving names and assigning stack
//! offsets (spec §4.3).

use ccutil::{Interner, Symbol};
use ccpar::{Block, ElseBranch, Expr, Function, Program, Stmt};

use crate::error::SemaError;
use crate::scope::{Entry, FunctionEntry, ScopeId, SymbolTable, VariableEntry};

/// Analyzes `program`, returning the populated [`SymbolTable`] on success.
/// Every `variable-decl` and `identifier` node in `program` is annotated
/// with its resolved offset as a side effect (spec's in-place AST
/// annotation, §9 Design Notes).
pub fn analyze(program: &Program, interner: &mut Interner) -> Result<SymbolTable, SemaError> {
    let mut table = SymbolTable::new();
    let global = table.global();
    let printf = interner.intern("printf");
    let mut has_main = false;

    for function in &program.functions {
        analyze_function(function, &mut table, global, interner, printf)?;
        if interner.resolve(function.name) == "main" {
            has_main = true;
        }
    }

    if !has_main {
        return Err(SemaError::MissingMain);
    }
    Ok(table)
}

fn analyze_function(
    function: &Function,
    table: &mut SymbolTable,
    global: ScopeId,
    interner: &mut Interner,
    printf: Symbol,
) -> Result<(), SemaError> {
    let local = table.new_child(global);

    let mut next_offset: i32 = 0;
    let mut min_offset: i32 = 0;
    let mut param_types = Vec::with_capacity(function.params.len());

    for param in &function.params {
        next_offset -= 8;
        min_offset = min_offset.min(next_offset);
        table
            .declare(local, param.name, Entry::Variable(VariableEntry { ty: param.ty, offset: next_offset, size: 8 }))
            .map_err(|_| SemaError::Redeclaration {
                name: interner.resolve(param.name).to_string(),
                line: function.span.line,
            })?;
        param_types.push(param.ty);
    }

    // Registering the function before walking its own body allows direct
    // recursion; functions declared later in the file are still invisible
    // to this one, matching the single forward pass spec §4.3 describes.
    table
        .declare(
            global,
            function.name,
            Entry::Function(FunctionEntry { ret_type: function.ret_type, param_types, frame_size: 0, locals: local }),
        )
        .map_err(|_| SemaError::Redeclaration {
            name: interner.resolve(function.name).to_string(),
            line: function.span.line,
        })?;

    analyze_block(&function.body, table, local, interner, printf, &mut next_offset, &mut min_offset)?;

    let frame_size = ccutil::align16(min_offset.unsigned_abs() as i64);
    table.set_frame_size(global, function.name, frame_size);
    Ok(())
}

fn analyze_block(
    block: &Block,
    table: &mut SymbolTable,
    scope: ScopeId,
    interner: &mut Interner,
    printf: Symbol,
    next_offset: &mut i32,
    min_offset: &mut i32,
) -> Result<(), SemaError> {
    for stmt in &block.stmts {
        analyze_stmt(stmt, table, scope, interner, printf, next_offset, min_offset)?;
    }
    Ok(())
}

fn analyze_stmt(
    stmt: &Stmt,
    table: &mut SymbolTable,
    scope: ScopeId,
    interner: &mut Interner,
    printf: Symbol,
    next_offset: &mut i32,
    min_offset: &mut i32,
) -> Result<(), SemaError> {
    match stmt {
        Stmt::VarDecl { ty, name, init, offset, span } => {
            if let Some(init_expr) = init {
                analyze_expr(init_expr, table, scope, interner, printf)?;
            }
            *next_offset -= 8;
            *min_offset = (*min_offset).min(*next_offset);
            table
                .declare(scope, *name, Entry::Variable(VariableEntry { ty: *ty, offset: *next_offset, size: 8 }))
                .map_err(|_| SemaError::Redeclaration { name: interner.resolve(*name).to_string(), line: span.line })?;
            offset.set(Some(*next_offset));
            Ok(())
        }
        Stmt::Assign { target, value, span } => {
            analyze_expr(value, table, scope, interner, printf)?;
            analyze_assign_target(target, table, scope, interner, span.line)
        }
        Stmt::Return { value, .. } => analyze_expr(value, table, scope, interner, printf),
        Stmt::If { cond, then_branch, else_branch, .. } => {
            analyze_expr(cond, table, scope, interner, printf)?;
            analyze_block(then_branch, table, scope, interner, printf, next_offset, min_offset)?;
            match else_branch {
                Some(ElseBranch::Block(b)) => {
                    analyze_block(b, table, scope, interner, printf, next_offset, min_offset)
                }
                Some(ElseBranch::If(inner)) => {
                    analyze_stmt(inner, table, scope, interner, printf, next_offset, min_offset)
                }
                None => Ok(()),
            }
        }
        Stmt::While { cond, body, .. } => {
            analyze_expr(cond, table, scope, interner, printf)?;
            analyze_block(body, table, scope, interner, printf, next_offset, min_offset)
        }
        Stmt::ExprStmt { value, .. } => analyze_expr(value, table, scope, interner, printf),
    }
}

fn analyze_assign_target(
    target: &Expr,
    table: &SymbolTable,
    scope: ScopeId,
    interner: &Interner,
    line: u32,
) -> Result<(), SemaError> {
    let Expr::Identifier { name, offset, .. } = target else {
        unreachable!("ccpar only builds assignment targets as identifiers")
    };
    match table.resolve(scope, *name) {
        Some(Entry::Variable(v)) => {
            offset.set(Some(v.offset));
            Ok(())
        }
        _ => Err(SemaError::AssignToUnknown { name: interner.resolve(*name).to_string(), line }),
    }
}

fn analyze_expr(
    expr: &Expr,
    table: &SymbolTable,
    scope: ScopeId,
    interner: &Interner,
    printf: Symbol,
) -> Result<(), SemaError> {
    match expr {
        Expr::IntLiteral { .. } | Expr::StringLiteral { .. } => Ok(()),
        Expr::Identifier { name, offset, span } => match table.resolve(scope, *name) {
            Some(Entry::Variable(v)) => {
                offset.set(Some(v.offset));
                Ok(())
            }
            _ => Err(SemaError::UnknownIdentifier { name: interner.resolve(*name).to_string(), line: span.line }),
        },
        Expr::Binary { left, right, .. } => {
            analyze_expr(left, table, scope, interner, printf)?;
            analyze_expr(right, table, scope, interner, printf)
        }
        Expr::Call { name, args, span } => {
            if *name != printf {
                match table.resolve(scope, *name) {
                    Some(Entry::Function(_)) => {}
                    _ => {
                        return Err(SemaError::UnknownFunction {
                            name: interner.resolve(*name).to_string(),
                            line: span.line,
                        })
                    }
                }
            }
            for arg in args {
                analyze_expr(arg, table, scope, interner, printf)?;
            }
            Ok(())
        }
    }
}
