//! Coursebook CLI - publish a course outline as a single HTML page.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "coursebook")]
#[command(about = "Build a single-page course site from a fixed lesson outline")]
#[command(version)]
pub struct Cli {
    /// Path to coursebook.toml config file
    #[arg(short, long, default_value = "coursebook.toml")]
    config: PathBuf,

    /// Output directory (defaults to config or "docs")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip CSS minification
    #[arg(long)]
    no_minify: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let minify = if cli.no_minify { Some(false) } else { None };
    commands::build::run(&cli.config, cli.output, minify)?;

    Ok(())
}
