mod cli;
mod config;
mod convert;
mod fit_cmd;
mod input;
mod logging;
mod output;
mod process_cmd;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Process(args) => process_cmd::run(args),
        Command::Fit(args) => fit_cmd::run(args),
    }
}
