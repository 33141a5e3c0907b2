//! ccdrv — CLI driver and pipeline orchestration for the `cc` binary.

mod cli;
mod pipeline;

pub use cli::Cli;
pub use pipeline::run;
