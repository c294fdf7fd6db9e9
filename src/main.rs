use clap::Parser;
use miette::Result;
use ss14_tiled::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    ss14_tiled::logging::init_logging();

    ss14_tiled::cli::generate::run(cli)?;

    Ok(())
}
