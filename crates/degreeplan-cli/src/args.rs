//! Command-line argument definitions for the degreeplan CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input documents, the configuration
//! file, the report format and logging verbosity.

use clap::Parser;

/// Command-line arguments for the degree plan checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Catalog files; later files add offered semesters to earlier ones
    #[arg(required = true, num_args = 1.., help = "Paths to the course catalog files")]
    pub catalogs: Vec<String>,

    /// Degrees file holding the template to check
    #[arg(short, long)]
    pub template: Option<String>,

    /// Template id within the degrees file (defaults to the first one)
    #[arg(short, long)]
    pub degree: Option<String>,

    /// Stored session with grades and checkboxes
    #[arg(short, long)]
    pub session: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Report file (defaults to standard output)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
