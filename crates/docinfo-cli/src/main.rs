//! docinfo CLI entry point.
//!
//! Parses arguments, sets up logging and dispatches to the command
//! implementations. Command output goes to stdout; logs go to stderr.

use clap::Parser;
use docinfo_cli::{cli, commands, error, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let output = commands::execute(&args).map_err(error::cli_error_to_miette)?;
    println!("{output}");
    Ok(())
}
