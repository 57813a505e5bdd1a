use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Rewrites relative markdown links in an HTML file into in-page anchors.
#[derive(Debug, Parser)]
#[command(name = "fix-links", version, about, long_about = None)]
struct Args {
    /// HTML file to rewrite in place
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    docpost::rewrite_links_in_file(&args.file).context("Failed to rewrite links")?;

    Ok(())
}
