//! Token kinds.
//!
//! A token carries no payload of its own beyond its [`Span`] — integer,
//! string, char, and identifier lexemes are all recovered on demand by
//! slicing the original source with the token's span. This mirrors spec
//! §3's data model directly (tag + half-open span + line) and sidesteps
//! keeping two copies of the same text around.

use ccutil::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,

    // operators
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    Amp,

    // keywords
    Return,
    If,
    Else,
    While,
    Struct,

    // literals / identifiers
    Ident,
    Int,
    Str,
    Char,

    Eof,
}

impl TokenKind {
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        Some(match s {
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "struct" => TokenKind::Struct,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}
