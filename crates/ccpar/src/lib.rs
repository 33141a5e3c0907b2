//! ccpar — recursive-descent parser: token stream → AST (spec §4.2).

mod ast;
mod error;
mod parser;

pub use ast::{BinOp, Block, ElseBranch, Expr, Function, Param, Program, Stmt};
pub use error::ParseError;
pub use parser::parse;

#[cfg(test)]
mod tests {
    use super::*;
    use ccutil::{Arena, Interner};

    fn parse_src<'a>(src: &'a str, arena: &'a Arena, interner: &mut Interner) -> Result<Program<'a>, ParseError> {
        let tokens = cclex::tokenize(src).expect("lex should succeed in these fixtures");
        parse(tokens, src, arena, interner)
    }

    #[test]
    fn parses_empty_program() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("", &arena, &mut interner).unwrap();
        assert!(program.functions.is_empty());
    }

    #[test]
    fn parses_main_with_var_decl_and_return() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("int main() { int a = 1; return a; }", &arena, &mut interner).unwrap();
        assert_eq!(program.functions.len(), 1);
        let f = program.functions[0];
        assert_eq!(interner.resolve(f.name), "main");
        assert_eq!(f.body.stmts.len(), 2);
        assert!(matches!(f.body.stmts[0], Stmt::VarDecl { .. }));
        assert!(matches!(f.body.stmts[1], Stmt::Return { .. }));
    }

    #[test]
    fn parses_function_params() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("int add(int a, int b) { return a + b; }", &arena, &mut interner).unwrap();
        let f = program.functions[0];
        assert_eq!(f.params.len(), 2);
        assert_eq!(interner.resolve(f.params[0].name), "a");
        assert_eq!(interner.resolve(f.params[1].name), "b");
    }

    #[test]
    fn left_associative_additive_chain() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("int main() { return 1 + 2 + 3; }", &arena, &mut interner).unwrap();
        let Stmt::Return { value, .. } = program.functions[0].body.stmts[0] else { panic!() };
        let Expr::Binary { op: BinOp::Add, left, .. } = value else { panic!("expected top-level +") };
        assert!(matches!(left, Expr::Binary { op: BinOp::Add, .. }), "should be left-deep: (1+2)+3");
    }

    #[test]
    fn precedence_multiply_binds_tighter_than_add() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("int main() { return 3 + 4 * 2; }", &arena, &mut interner).unwrap();
        let Stmt::Return { value, .. } = program.functions[0].body.stmts[0] else { panic!() };
        let Expr::Binary { op: BinOp::Add, right, .. } = value else { panic!("expected top-level +") };
        assert!(matches!(right, Expr::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn if_else_if_chains_via_nested_if() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let src = "int main() { if (a == b) { return 1; } else if (a == c) { return 2; } else { return 3; } }";
        let program = parse_src(src, &arena, &mut interner).unwrap();
        let Stmt::If { else_branch: Some(ElseBranch::If(inner)), .. } = program.functions[0].body.stmts[0] else {
            panic!("expected else-if chain")
        };
        assert!(matches!(inner, Stmt::If { else_branch: Some(ElseBranch::Block(_)), .. }));
    }

    #[test]
    fn call_with_string_and_int_args() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src(r#"int main() { printf("a: %d\n", 1); return 0; }"#, &arena, &mut interner).unwrap();
        let Stmt::ExprStmt { value, .. } = program.functions[0].body.stmts[0] else { panic!() };
        let Expr::Call { name, args, .. } = value else { panic!("expected call") };
        assert_eq!(interner.resolve(*name), "printf");
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0], Expr::StringLiteral { .. }));
        assert!(matches!(args[1], Expr::IntLiteral { value: 1, .. }));
    }

    #[test]
    fn ident_ident_disambiguates_as_var_decl() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("int main() { int x = 0; x = 1; }", &arena, &mut interner).unwrap();
        let stmts = &program.functions[0].body.stmts;
        assert!(matches!(stmts[0], Stmt::VarDecl { .. }));
        assert!(matches!(stmts[1], Stmt::Assign { .. }));
    }

    #[test]
    fn unsupported_comparison_operator_is_a_parse_error() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let err = parse_src("int main() { if (a < b) { return 1; } }", &arena, &mut interner).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedOperator { .. }));
    }

    #[test]
    fn missing_semicolon_is_fatal() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let err = parse_src("int main() { return 1 }", &arena, &mut interner).unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { .. }));
    }

    #[test]
    fn binary_expression_span_covers_both_operands() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let program = parse_src("int main() { return 12 + 345; }", &arena, &mut interner).unwrap();
        let Stmt::Return { value, .. } = &program.functions[0].body.stmts[0] else { panic!() };
        let Expr::Binary { span, .. } = value else { panic!() };
        assert_eq!(span.text("int main() { return 12 + 345; }"), "12 + 345");
    }

    #[test]
    fn truncated_input_is_unexpected_eof() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let err = parse_src("int main() { return", &arena, &mut interner).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    proptest::proptest! {
        #[test]
        fn never_panics_on_arbitrary_token_soup(s in "[a-zA-Z0-9_(){};=+*/., ]{0,80}") {
            let arena = Arena::new();
            let mut interner = Interner::new();
            if let Ok(tokens) = cclex::tokenize(&s) {
                let _ = parse(tokens, &s, &arena, &mut interner);
            }
        }
    }
}
