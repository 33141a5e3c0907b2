use thiserror::Error;

/// All parse failures are fatal at first occurrence (spec §4.2, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected {expected}, found {found}")]
    Unexpected { line: u32, expected: String, found: String },

    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { line: u32, expected: String },

    #[error("line {line}: '{token}' is tokenized but not part of the accepted grammar")]
    UnsupportedOperator { line: u32, token: String },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::Unexpected { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::UnsupportedOperator { line, .. } => *line,
        }
    }
}
