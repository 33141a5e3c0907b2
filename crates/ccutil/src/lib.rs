//! ccutil — shared foundation types for the `cc` compiler workspace.
//!
//! Every other crate in the workspace depends on this one for source
//! locations (`Span`), identifier interning (`Symbol`/`Interner`), and the
//! arena type used to own the AST and symbol tables for one compilation.
//! Diagnostics are each stage's own `thiserror` enum (`LexError`,
//! `ParseError`, `SemaError`, `CodegenError`), propagated with `?` into the
//! `anyhow::Result` the `cc` driver is built on — this crate carries no
//! diagnostic-collection type of its own.

mod span;
mod symbol;

pub use span::Span;
pub use symbol::{Interner, Symbol};

/// The arena every AST node and symbol-table entry for one compilation is
/// allocated from. A single `bumpalo::Bump` per compilation means nothing is
/// freed until the whole tree is freed at once (Design Notes: "Arenas for
/// AST and symbols").
pub type Arena = bumpalo::Bump;

/// Round `n` up to the next multiple of 16 (the frame-size alignment the
/// System-V ABI requires of a function's stack frame).
#[inline]
pub fn align16(n: i64) -> i64 {
    (n + 15) & !15
}
