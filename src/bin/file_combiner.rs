//! File aggregator entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scriptbox::combine::{self, CombineConfig};
use scriptbox::exclude::ExcludeList;
use scriptbox::logger;

/// Command-line arguments for file-combiner
#[derive(Parser, Debug)]
#[command(name = "file-combiner")]
#[command(about = "Combine directory files into a single markdown file")]
#[command(version)]
struct Args {
    /// Files or directories to process
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output file path (default: Combined-HHMM.txt in current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Recursive search in subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// File exclusion pattern (repeatable)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Disable default exclusions
    #[arg(long)]
    no_default_excludes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let multi = logger::init(args.verbose).context("Failed to install logger")?;

    let excludes = ExcludeList::build(&args.exclude, !args.no_default_excludes)
        .context("Failed to compile exclusion patterns")?;
    let config = CombineConfig {
        paths: args.paths,
        output: args.output,
        recursive: args.recursive,
        excludes,
        verbose: args.verbose,
    };

    let summary = combine::run(&config, &multi)?;
    summary.print(config.verbose);
    Ok(())
}
