use anyhow::{Context, Result};
use clap::Parser;
use docpost::Lexicon;
use std::path::PathBuf;

/// Applies aivi syntax coloring to tagged code blocks in an HTML file.
#[derive(Debug, Parser)]
#[command(name = "highlight", version, about, long_about = None)]
struct Args {
    /// HTML file to rewrite in place
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let blocks = docpost::highlight_file(&args.file, &Lexicon::aivi())
        .context("Failed to apply syntax highlighting")?;

    if blocks > 0 {
        println!("✓ Syntax highlighting applied to {}", args.file.display());
    }

    Ok(())
}
