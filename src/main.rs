mod cli;
mod common;
mod config;
mod daily_cmd;
mod logging;
mod scores_cmd;
mod shortrange_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Daily(args) => daily_cmd::run(args),
        Command::ShortRange(args) => shortrange_cmd::run(args),
        Command::Scores(args) => scores_cmd::run(args),
    }
}
