use anyhow::{Context, Result};
use clap::Parser;
use debug_scrub::{logging, run, Catalog, StripOptions};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Strip known debug print statements from the game scripts",
    long_about = None
)]
struct Args {
    /// Directory the target files are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Report what would be removed without modifying any file
    #[arg(long)]
    dry_run: bool,

    /// Log every removed line to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(args.verbose);

    let catalog = Catalog::builtin()?;
    tracing::debug!(
        targets = catalog.targets.len(),
        patterns = catalog.patterns.len(),
        directory = %args.directory.display(),
        "Loaded catalog"
    );

    let stdout = io::stdout();
    let options = StripOptions {
        dry_run: args.dry_run,
        color: stdout.is_terminal(),
    };
    let mut out = stdout.lock();
    run(&args.directory, &catalog, options, &mut out)?;
    out.flush().context("Failed to flush stdout")?;

    Ok(())
}
