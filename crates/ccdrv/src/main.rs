use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccdrv::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("CC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    // `--help`/`--version` keep clap's own exit(0); every other usage error
    // (missing or multiple input files among them) exits 1 like every other
    // fatal pipeline error, not clap's default exit(2).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = ccdrv::run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
