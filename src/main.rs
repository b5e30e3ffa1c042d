// src/main.rs

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use spec_cleaner::{CleanerConfig, ConversionTables, WriterSink, clean_spec, clean_spec_into};
use std::fs;
use std::sync::Arc;
use tracing::info;

fn load_tables(cli: &Cli) -> Result<ConversionTables> {
    let mut config = match &cli.config {
        Some(path) => CleanerConfig::load(path)?,
        None => CleanerConfig::load_default()?,
    };
    if let Some(path) = &cli.licenses {
        config.licenses = Some(path.clone());
    }
    if let Some(path) = &cli.pkgconfig {
        config.pkgconfig = Some(path.clone());
    }

    config.load_tables().context("Failed to load conversion tables")
}

fn run(cli: &Cli) -> Result<()> {
    let tables = Arc::new(load_tables(cli)?);
    let text = fs::read_to_string(&cli.spec)
        .with_context(|| format!("Failed to read {}", cli.spec.display()))?;

    info!("Cleaning {}", cli.spec.display());

    if cli.diff {
        let cleaned = clean_spec(&text, &tables)?;
        print!("{}", diffy::create_patch(&text, &cleaned));
    } else if cli.inline {
        let cleaned = clean_spec(&text, &tables)?;
        fs::write(&cli.spec, cleaned)
            .with_context(|| format!("Failed to write {}", cli.spec.display()))?;
    } else if let Some(output) = &cli.output {
        let cleaned = clean_spec(&text, &tables)?;
        fs::write(output, cleaned)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    } else {
        let mut sink = WriterSink::new(std::io::stdout().lock());
        clean_spec_into(&text, &tables, &mut sink)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging; stdout carries the spec
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}
