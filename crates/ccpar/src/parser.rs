//! Hand-written recursive-descent parser (spec §4.2).

use ccutil::{Arena, Interner, Span, Symbol};
use cclex::{Token, TokenKind};

use crate::ast::{BinOp, Block, ElseBranch, Expr, Function, Param, Program, Stmt};
use crate::error::ParseError;

pub struct Parser<'a, 'b> {
    tokens: Vec<Token>,
    source: &'a str,
    arena: &'a Arena,
    interner: &'b mut Interner,
    pos: usize,
}

/// Parses a token stream into a [`Program`], interning identifiers into
/// `interner` and allocating every node out of `arena`.
pub fn parse<'a, 'b>(
    tokens: Vec<Token>,
    source: &'a str,
    arena: &'a Arena,
    interner: &'b mut Interner,
) -> Result<Program<'a>, ParseError> {
    Parser { tokens, source, arena, interner, pos: 0 }.parse_program()
}

impl<'a, 'b> Parser<'a, 'b> {
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or_else(|| self.tokens.last().unwrap())
    }

    fn line(&self) -> u32 {
        self.current().span.line
    }

    fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    fn describe(&self, token: &Token) -> String {
        if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", self.text(token))
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn bump(&mut self) -> Token {
        let tok = *self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else if self.at(TokenKind::Eof) {
            Err(ParseError::UnexpectedEof { line: self.line(), expected: expected.to_string() })
        } else {
            let found = self.describe(self.current());
            Err(ParseError::Unexpected { line: self.line(), expected: expected.to_string(), found })
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(Symbol, Span), ParseError> {
        let tok = self.expect(TokenKind::Ident, expected)?;
        Ok((self.interner.intern(self.text(&tok)), tok.span))
    }

    fn alloc_expr(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    fn alloc_stmt(&self, stmt: Stmt<'a>) -> &'a Stmt<'a> {
        self.arena.alloc(stmt)
    }

    // program := function*
    fn parse_program(&mut self) -> Result<Program<'a>, ParseError> {
        let mut program = Program::default();
        while !self.at(TokenKind::Eof) {
            let function = self.parse_function()?;
            program.functions.push(self.arena.alloc(function));
        }
        Ok(program)
    }

    // function := ident ident '(' params? ')' block
    fn parse_function(&mut self) -> Result<Function<'a>, ParseError> {
        let start_span = self.current().span;
        let (ret_type, _) = self.expect_ident("a return type")?;
        let (name, _) = self.expect_ident("a function name")?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            params.push(self.parse_param()?);
            while self.at(TokenKind::Comma) {
                self.bump();
                params.push(self.parse_param()?);
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Function { name, ret_type, params, body, span: start_span })
    }

    // param := ident ident
    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let (ty, _) = self.expect_ident("a parameter type")?;
        let (name, _) = self.expect_ident("a parameter name")?;
        Ok(Param { ty, name })
    }

    // block := '{' statement* '}'
    fn parse_block(&mut self) -> Result<Block<'a>, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut block = Block::default();
        while !self.at(TokenKind::RBrace) {
            block.stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(block)
    }

    fn parse_statement(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        match self.current().kind {
            TokenKind::Ident => {
                if self.peek_at(1).kind == TokenKind::Ident {
                    self.parse_var_decl()
                } else if self.peek_at(1).kind == TokenKind::Assign {
                    self.parse_assign()
                } else {
                    self.parse_expr_stmt()
                }
            }
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            _ => self.parse_expr_stmt(),
        }
    }

    // varDecl := ident ident '=' expression ';'
    fn parse_var_decl(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        let span = self.current().span;
        let (ty, _) = self.expect_ident("a type name")?;
        let (name, _) = self.expect_ident("a variable name")?;
        self.expect(TokenKind::Assign, "'='")?;
        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.alloc_stmt(Stmt::VarDecl { ty, name, init: Some(init), offset: Default::default(), span }))
    }

    // assign := ident '=' expression ';'
    fn parse_assign(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        let tok = self.bump();
        let name = self.interner.intern(self.text(&tok));
        let target = self.alloc_expr(Expr::Identifier { name, offset: Default::default(), span: tok.span });
        self.expect(TokenKind::Assign, "'='")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.alloc_stmt(Stmt::Assign { target, value, span: tok.span }))
    }

    // return := 'return' expression ';'
    fn parse_return(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        let tok = self.expect(TokenKind::Return, "'return'")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.alloc_stmt(Stmt::Return { value, span: tok.span }))
    }

    // if := 'if' '(' expression ')' block ('else' (if | block))?
    fn parse_if(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        let tok = self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.at(TokenKind::Else) {
            self.bump();
            if self.at(TokenKind::If) {
                Some(ElseBranch::If(self.parse_if()?))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };
        Ok(self.alloc_stmt(Stmt::If { cond, then_branch, else_branch, span: tok.span }))
    }

    // while := 'while' '(' expression ')' block
    fn parse_while(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        let tok = self.expect(TokenKind::While, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(self.alloc_stmt(Stmt::While { cond, body, span: tok.span }))
    }

    // exprStmt := expression ';'
    fn parse_expr_stmt(&mut self) -> Result<&'a Stmt<'a>, ParseError> {
        let span = self.current().span;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.alloc_stmt(Stmt::ExprStmt { value, span }))
    }

    // expression := equality
    fn parse_expression(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        self.parse_equality()
    }

    // equality := additive (('==' | '!=') additive)*
    fn parse_equality(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            self.bump();
            let right = self.parse_additive()?;
            let span = left.span().to(right.span());
            left = self.alloc_expr(Expr::Binary { op, left, right, span });
        }
        Ok(left)
    }

    // additive := term (('+' | '-') term)*
    fn parse_additive(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let right = self.parse_term()?;
            let span = left.span().to(right.span());
            left = self.alloc_expr(Expr::Binary { op, left, right, span });
        }
        Ok(left)
    }

    // term := factor (('*' | '/') factor)*
    fn parse_term(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.bump();
            let right = self.parse_factor()?;
            let span = left.span().to(right.span());
            left = self.alloc_expr(Expr::Binary { op, left, right, span });
        }
        Ok(left)
    }

    // factor := primary
    fn parse_factor(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        self.parse_primary()
    }

    // primary := int | string | ident ('(' args? ')')?
    fn parse_primary(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Int => {
                self.bump();
                let value: i64 = self.text(&tok).parse().expect("lexer guarantees decimal digits");
                Ok(self.alloc_expr(Expr::IntLiteral { value, span: tok.span }))
            }
            TokenKind::Str => {
                self.bump();
                let raw = self.text(&tok);
                let value = raw[1..raw.len() - 1].to_string();
                Ok(self.alloc_expr(Expr::StringLiteral { value, span: tok.span }))
            }
            TokenKind::Ident => {
                self.bump();
                let name = self.interner.intern(self.text(&tok));
                if self.at(TokenKind::LParen) {
                    self.bump();
                    let mut args = Vec::new();
                    if !self.at(TokenKind::RParen) {
                        args.push(self.parse_expression()?);
                        while self.at(TokenKind::Comma) {
                            self.bump();
                            args.push(self.parse_expression()?);
                        }
                    }
                    self.expect(TokenKind::RParen, "')'")?;
                    Ok(self.alloc_expr(Expr::Call { name, args, span: tok.span }))
                } else {
                    Ok(self.alloc_expr(Expr::Identifier { name, offset: Default::default(), span: tok.span }))
                }
            }
            TokenKind::AndAnd
            | TokenKind::OrOr
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::Dot
            | TokenKind::LBracket
            | TokenKind::RBracket => {
                Err(ParseError::UnsupportedOperator { line: tok.span.line, token: self.text(&tok).to_string() })
            }
            TokenKind::Eof => {
                Err(ParseError::UnexpectedEof { line: tok.span.line, expected: "an expression".to_string() })
            }
            _ => {
                let found = self.describe(&tok);
                Err(ParseError::Unexpected { line: tok.span.line, expected: "an expression".to_string(), found })
            }
        }
    }
}
