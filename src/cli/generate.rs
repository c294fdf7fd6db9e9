//! The generate run: read config, run the pipeline, print the summary.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::generate;

use super::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let printer = Printer::new();
    let cwd = std::env::current_dir()?;

    let mut config = Config::discover(&cwd)?;
    if let Some(output) = cli.output {
        config.output = output;
    }

    let root = expand_home(&cli.root, std::env::var_os("HOME").map(PathBuf::from).as_deref());
    printer.status("Reading", &display_path(&root));

    let summary = generate(&root, &config, &printer)?;

    let mut message = format!(
        "{} into {} ({} written, {} new",
        plural(summary.tilesets.len(), "tileset", "tilesets"),
        display_path(&config.output),
        summary.written(),
        summary.added(),
    );
    if summary.skipped() > 0 {
        message.push_str(&format!(", {} skipped", summary.skipped()));
    }
    message.push(')');
    printer.success("Finished", &message);

    Ok(())
}

/// Replace a leading `~` with the home directory, when one is known.
fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
