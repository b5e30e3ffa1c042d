// src/cli.rs
// Command-line definition, shared with build.rs through include!().
// Keep this file free of crate-internal paths.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spec-cleaner")]
#[command(author, version, about = "Canonicalize the preamble of RPM spec files", long_about = None)]
pub struct Cli {
    /// Spec file to clean
    pub spec: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["inline", "diff"])]
    pub output: Option<PathBuf>,

    /// Rewrite the spec file in place
    #[arg(short, long, conflicts_with = "diff")]
    pub inline: bool,

    /// Print a unified diff of the changes instead of the result
    #[arg(short, long)]
    pub diff: bool,

    /// License alias table (overrides the configuration)
    #[arg(long, value_name = "PATH")]
    pub licenses: Option<PathBuf>,

    /// pkg-config conversion table (overrides the configuration)
    #[arg(long, value_name = "PATH")]
    pub pkgconfig: Option<PathBuf>,

    /// Configuration file (default: ~/.config/spec-cleaner/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
