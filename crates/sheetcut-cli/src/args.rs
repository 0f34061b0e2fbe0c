//! Command-line argument definitions for the Sheetcut CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the job file, where and in which format
//! the layout is written, whether the optimizer is called first, the
//! configuration file, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output format of the rendered layout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// The diagram as SVG (`cut-layout.svg`)
    Svg,
    /// The diagram exported as PNG (`cut-layout.png`)
    Png,
}

/// Command-line arguments for the Sheetcut layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input job file (TOML)
    #[arg(help = "Path to the job file")]
    pub input: String,

    /// Directory the layout file is written into
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Send the job to the optimizer before rendering
    #[arg(long)]
    pub optimize: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
