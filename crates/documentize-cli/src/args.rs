//! Command-line argument definitions for the Documentize CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the components to document, where the
//! patched sources go, extra declaration files, configuration and logging.

use clap::Parser;

/// Command-line arguments for the Documentize preprocessor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Component files to document
    #[arg(required = true, help = "Paths to the component files")]
    pub inputs: Vec<String>,

    /// Directory for patched components. Patched sources go to stdout when omitted.
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Declaration files shared by every component
    #[arg(short, long = "declarations")]
    pub declarations: Vec<String>,

    /// Report skipped files and unresolved symbols
    #[arg(long)]
    pub debug: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
