//! CLI entrypoint for `catalog-inspect`.

use std::io::{self, Write};

use catalog_inspect::cli::Args;
use catalog_inspect::{InspectError, run};
use clap::Parser;
use tracing::Level;

fn main() -> Result<(), InspectError> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when embedded; keep that one.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .try_init()
        .ok();
}
