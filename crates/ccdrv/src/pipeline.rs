//! Drives lex → parse → sema → codegen → print in order, short-circuiting
//! at the first stage that fails (spec §7: the first error is fatal).

use anyhow::Context;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    cli.validate()?;

    let source = std::fs::read_to_string(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;

    tracing::debug!(path = %cli.input.display(), bytes = source.len(), "read source");
    let tokens = cclex::tokenize(&source)?;
    tracing::debug!(count = tokens.len(), "lexed");
    if cli.print_tokens {
        println!("{tokens:#?}");
        return Ok(());
    }

    let arena = ccutil::Arena::new();
    let mut interner = ccutil::Interner::new();
    let program = ccpar::parse(tokens, &source, &arena, &mut interner)?;
    tracing::debug!(functions = program.functions.len(), "parsed");
    if cli.print_ast {
        println!("{program:#?}");
        return Ok(());
    }

    let table = ccsem::analyze(&program, &mut interner)?;
    tracing::debug!("analyzed");
    if cli.print_sema {
        println!("{table:#?}");
        return Ok(());
    }

    let assembly = ccgen::generate(&program, &table, &interner)?;
    tracing::debug!("generated code");

    print!("{}", ccasm::print(&assembly));
    Ok(())
}
