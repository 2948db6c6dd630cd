//! fundus-prep CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, dispatch to the crop or
//! augment stage, and exit with a non-zero status when a stage cannot start.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
