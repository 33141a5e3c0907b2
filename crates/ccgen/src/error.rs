use thiserror::Error;

/// Codegen failures are narrow and all fatal (spec §7).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodegenError {
    #[error("ran out of registers for expression")]
    OutOfRegisters,

    #[error("assignment to non-identifier")]
    AssignToNonIdentifier,

    #[error("unhandled node type")]
    UnhandledNode,
}
