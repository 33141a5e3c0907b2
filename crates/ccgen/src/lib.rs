//! ccgen — lowers a sema-annotated AST to the `ccir` assembly IR (spec §4.4).

mod codegen;
mod context;
mod error;
mod expr;
mod stmt;

use ccir::Assembly;
use ccpar::Program;
use ccsem::SymbolTable;
use ccutil::Interner;

pub use codegen::Codegen;
pub use error::CodegenError;

/// Lowers `program` (already analyzed into `table`) to an [`Assembly`].
pub fn generate(program: &Program, table: &SymbolTable, interner: &Interner) -> Result<Assembly, CodegenError> {
    Codegen::new(interner).generate(program, table)
}
