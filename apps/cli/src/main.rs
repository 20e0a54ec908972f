//! docnav CLI: terminal front end for a documentation corpus.
//!
//! Resolves routes, runs searches, and renders pages as plain text on top
//! of `docnav-core`.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
