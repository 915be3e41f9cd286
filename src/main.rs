use clap::Parser;
use miette::Result;
use tpadder::cli::{Cli, Commands};
use tpadder::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().verbose(cli.verbose);

    match cli.command {
        Commands::Pad(args) => tpadder::cli::pad::run(args, &printer)?,
        Commands::Preview(args) => tpadder::cli::preview::run(args, &printer)?,
        Commands::Init(args) => tpadder::cli::init::run(args, &printer)?,
        Commands::Completions(args) => tpadder::cli::completions::run(args)?,
    }

    Ok(())
}
