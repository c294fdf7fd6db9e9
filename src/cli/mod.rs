pub mod generate;

use std::path::PathBuf;

use clap::Parser;

/// ss14-tiled - Tiled tilesets from Space Station 14 resources
#[derive(Parser, Debug)]
#[command(name = "ss14-tiled")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root of a Space Station 14 checkout (the directory holding Resources/)
    pub root: PathBuf,

    /// Output directory (overrides ss14-tiled.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
