//! Command-line argument definitions (spec §6).

use std::path::PathBuf;

use clap::Parser;

/// Single-pass ahead-of-time compiler for a small C-like language subset.
///
/// Reads `input`, compiles it, and writes System-V AMD64 AT&T-syntax
/// assembly to standard output. One of the `--print-*` flags dumps an
/// earlier pipeline stage instead of compiling all the way through.
#[derive(Parser, Debug)]
#[command(name = "cc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Source file to compile.
    pub input: PathBuf,

    /// Dump the token stream instead of compiling.
    #[arg(long)]
    pub print_tokens: bool,

    /// Dump the parsed AST instead of compiling.
    #[arg(long)]
    pub print_ast: bool,

    /// Dump the resolved symbol table instead of compiling.
    #[arg(long)]
    pub print_sema: bool,
}

impl Cli {
    /// At most one debug dump flag may be given (spec §6).
    pub fn validate(&self) -> anyhow::Result<()> {
        let set = [self.print_tokens, self.print_ast, self.print_sema].iter().filter(|b| **b).count();
        if set > 1 {
            anyhow::bail!("at most one of --print-tokens, --print-ast, --print-sema may be given");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_input_path() {
        let cli = Cli::parse_from(["cc", "main.c"]);
        assert_eq!(cli.input, PathBuf::from("main.c"));
        assert!(!cli.print_tokens && !cli.print_ast && !cli.print_sema);
    }

    #[test]
    fn accepts_a_single_print_flag() {
        let cli = Cli::parse_from(["cc", "main.c", "--print-ast"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_two_print_flags() {
        let cli = Cli::parse_from(["cc", "main.c", "--print-ast", "--print-tokens"]);
        assert!(cli.validate().is_err());
    }
}
