//! Lexer: source bytes → token stream, expanding `#define` integer constants.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use ccutil::Span;
use rustc_hash::FxHashMap;

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Lexes one source file into a flat token vector.
///
/// The `#define` table (`name -> span of its digits`) is private to the
/// lexer and dropped once [`Lexer::tokenize`] returns, per spec §4.1: later
/// stages only ever see the substituted int-literal tokens.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    defines: FxHashMap<String, Span>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, cursor: Cursor::new(source), defines: FxHashMap::default() }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.cursor.is_eof() {
                tokens.push(Token::new(TokenKind::Eof, Span::point(self.cursor.pos(), self.cursor.line())));
                break;
            }
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    /// Skips whitespace, `//` and `/* */` comments, and `#define` directives.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.bump();
                }
                b'/' if self.cursor.peek_at(1) == b'/' => {
                    while !self.cursor.is_eof() && self.cursor.peek() != b'\n' {
                        self.cursor.bump();
                    }
                }
                b'/' if self.cursor.peek_at(1) == b'*' => {
                    let start_line = self.cursor.line();
                    self.cursor.bump();
                    self.cursor.bump();
                    loop {
                        if self.cursor.is_eof() {
                            return Err(LexError::UnterminatedBlockComment { line: start_line });
                        }
                        if self.cursor.peek() == b'*' && self.cursor.peek_at(1) == b'/' {
                            self.cursor.bump();
                            self.cursor.bump();
                            break;
                        }
                        self.cursor.bump();
                    }
                }
                b'#' => self.lex_define()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// `#define NAME <digits>` — consumed entirely as trivia; registers
    /// `NAME` to later be rewritten wherever it appears as an identifier.
    fn lex_define(&mut self) -> Result<(), LexError> {
        let line = self.cursor.line();
        self.cursor.bump(); // '#'
        self.skip_inline_whitespace();
        for expected in b"define" {
            if self.cursor.bump() != *expected {
                return Err(LexError::MalformedDefine { line });
            }
        }
        self.skip_inline_whitespace();

        let name_start = self.cursor.pos();
        if !is_ident_start(self.cursor.peek()) {
            return Err(LexError::MalformedDefine { line });
        }
        while is_ident_continue(self.cursor.peek()) {
            self.cursor.bump();
        }
        let name = self.source[name_start..self.cursor.pos()].to_string();

        self.skip_inline_whitespace();
        let digits_start = self.cursor.pos();
        if !self.cursor.peek().is_ascii_digit() {
            return Err(LexError::MalformedDefine { line });
        }
        while self.cursor.peek().is_ascii_digit() {
            self.cursor.bump();
        }
        let digits_span = Span::new(digits_start, self.cursor.pos(), line);

        self.skip_inline_whitespace();
        match self.cursor.peek() {
            b'\n' | 0 => {}
            _ => return Err(LexError::MalformedDefine { line }),
        }

        self.defines.insert(name, digits_span);
        Ok(())
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.cursor.peek(), b' ' | b'\t') {
            self.cursor.bump();
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        let line = self.cursor.line();
        let b = self.cursor.peek();

        let kind = match b {
            b'(' => { self.cursor.bump(); TokenKind::LParen }
            b')' => { self.cursor.bump(); TokenKind::RParen }
            b'{' => { self.cursor.bump(); TokenKind::LBrace }
            b'}' => { self.cursor.bump(); TokenKind::RBrace }
            b'[' => { self.cursor.bump(); TokenKind::LBracket }
            b']' => { self.cursor.bump(); TokenKind::RBracket }
            b',' => { self.cursor.bump(); TokenKind::Comma }
            b';' => { self.cursor.bump(); TokenKind::Semicolon }
            b'.' => { self.cursor.bump(); TokenKind::Dot }
            b'+' => { self.cursor.bump(); TokenKind::Plus }
            b'-' => { self.cursor.bump(); TokenKind::Minus }
            b'*' => { self.cursor.bump(); TokenKind::Star }
            b'/' => { self.cursor.bump(); TokenKind::Slash }
            b'=' => {
                self.cursor.bump();
                if self.cursor.bump_if(b'=') { TokenKind::EqEq } else { TokenKind::Assign }
            }
            b'!' => {
                self.cursor.bump();
                if self.cursor.bump_if(b'=') {
                    TokenKind::NotEq
                } else {
                    return Err(LexError::StrayBang { line });
                }
            }
            b'<' => {
                self.cursor.bump();
                if self.cursor.bump_if(b'=') { TokenKind::LtEq } else { TokenKind::Lt }
            }
            b'>' => {
                self.cursor.bump();
                if self.cursor.bump_if(b'=') { TokenKind::GtEq } else { TokenKind::Gt }
            }
            b'&' => {
                self.cursor.bump();
                if self.cursor.bump_if(b'&') { TokenKind::AndAnd } else { TokenKind::Amp }
            }
            b'|' => {
                self.cursor.bump();
                if self.cursor.bump_if(b'|') {
                    TokenKind::OrOr
                } else {
                    return Err(LexError::StrayPipe { line });
                }
            }
            b'"' => return self.lex_string(start, line),
            b'\'' => return self.lex_char(start, line),
            b'0'..=b'9' => return Ok(self.lex_number(start, line)),
            b if is_ident_start(b) => return self.lex_identifier(start, line),
            other => return Err(LexError::UnexpectedByte { line, byte: other }),
        };

        Ok(Token::new(kind, Span::new(start, self.cursor.pos(), line)))
    }

    fn lex_string(&mut self, start: usize, line: u32) -> Result<Token, LexError> {
        self.cursor.bump(); // opening quote
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::UnterminatedString { line });
            }
            match self.cursor.peek() {
                b'"' => {
                    self.cursor.bump();
                    break;
                }
                b'\\' if !self.cursor.is_eof() => {
                    self.cursor.bump();
                    if self.cursor.is_eof() {
                        return Err(LexError::UnterminatedString { line });
                    }
                    self.cursor.bump();
                }
                _ => {
                    self.cursor.bump();
                }
            }
        }
        Ok(Token::new(TokenKind::Str, Span::new(start, self.cursor.pos(), line)))
    }

    fn lex_char(&mut self, start: usize, line: u32) -> Result<Token, LexError> {
        self.cursor.bump(); // opening quote
        if self.cursor.is_eof() {
            return Err(LexError::UnterminatedChar { line });
        }
        if self.cursor.peek() == b'\\' {
            self.cursor.bump();
            if self.cursor.is_eof() {
                return Err(LexError::UnterminatedChar { line });
            }
            self.cursor.bump();
        } else {
            self.cursor.bump();
        }
        if self.cursor.peek() != b'\'' {
            return Err(LexError::UnterminatedChar { line });
        }
        self.cursor.bump();
        Ok(Token::new(TokenKind::Char, Span::new(start, self.cursor.pos(), line)))
    }

    fn lex_number(&mut self, start: usize, line: u32) -> Token {
        while self.cursor.peek().is_ascii_digit() {
            self.cursor.bump();
        }
        Token::new(TokenKind::Int, Span::new(start, self.cursor.pos(), line))
    }

    fn lex_identifier(&mut self, start: usize, line: u32) -> Result<Token, LexError> {
        while is_ident_continue(self.cursor.peek()) {
            self.cursor.bump();
        }
        let end = self.cursor.pos();
        let text = &self.source[start..end];

        if let Some(kind) = TokenKind::keyword_from_str(text) {
            return Ok(Token::new(kind, Span::new(start, end, line)));
        }

        if let Some(&digits_span) = self.defines.get(text) {
            return Ok(Token::new(TokenKind::Int, digits_span));
        }

        Ok(Token::new(TokenKind::Ident, Span::new(start, end, line)))
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
