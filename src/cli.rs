//! CLI argument parsing for topiclens

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the topic report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Configuration preset applied before any config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Default,
    /// Demands more evidence before a confident call
    Strict,
    /// Commits earlier on thin data
    Permissive,
}

#[derive(Parser, Debug)]
#[command(name = "topiclens")]
#[command(version)]
#[command(about = "Statistical topic performance analysis for video catalogs", long_about = None)]
pub struct Cli {
    /// Catalog JSON file (array of videos or {"videos": [...]})
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// TOML file overriding engine thresholds
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Threshold preset used when no config file is given
    #[arg(long, value_enum, default_value = "default")]
    pub preset: Preset,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Measure recency from this date instead of now (ISO-8601)
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<String>,

    /// Only show the strongest topics of each category
    #[arg(long)]
    pub top: bool,

    /// Enable debug tracing output to stderr
    #[arg(long)]
    pub debug: bool,
}
