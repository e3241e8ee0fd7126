mod cli;
mod run;
mod summary;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    run::run(cli::Cli::parse())
}
