//! Command-line tool for solving Apollonius' problem with Lie sphere
//! geometry.

#[macro_use]
extern crate lazy_static;

mod cli;
mod problem;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let args = cli::Args::parse();
    cli::exec(args.subcommand)
}
