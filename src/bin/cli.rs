// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::Result;

use gc_scrape::{cli, log};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Cli::parse();
    log::init(args.verbose);

    let summary = cli::run(&args)?;
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
