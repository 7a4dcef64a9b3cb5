//! `sm2me` command line entry point.
use clap::Parser;
use color_eyre::eyre::Result;
use sm2me::cmd::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sm2me::logging::init(cli.verbose);
    cli.cmd.run()?;

    Ok(())
}
