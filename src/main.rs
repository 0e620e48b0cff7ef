//! s1bands CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, dispatch the subcommand,
//! and exit with an error status on failure. For programmatic use, prefer the
//! library API (`s1bands::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
