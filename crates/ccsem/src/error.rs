use thiserror::Error;

/// All semantic failures are fatal at first occurrence (spec §4.3, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemaError {
    #[error("line {line}: unknown identifier '{name}'")]
    UnknownIdentifier { name: String, line: u32 },

    #[error("line {line}: call to unknown function '{name}'")]
    UnknownFunction { name: String, line: u32 },

    #[error("line {line}: '{name}' is already declared in this scope")]
    Redeclaration { name: String, line: u32 },

    #[error("no 'main' function declared")]
    MissingMain,

    #[error("line {line}: assignment target '{name}' is not a known variable")]
    AssignToUnknown { name: String, line: u32 },
}
