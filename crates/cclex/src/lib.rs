//! cclex — tokenizes source text for the `cc` compiler (spec §4.1).
//!
//! Punctuation, operators, keywords, identifiers, and int/string/char
//! literals are recognized on raw bytes; `#define NAME <digits>` directives
//! are expanded away before any token reaches `ccpar`.

mod cursor;
mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
