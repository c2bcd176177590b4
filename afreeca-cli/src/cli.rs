use std::path::PathBuf;

use afreeca_parser::extractor::platforms::afreeca::QualityTier;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "afreeca",
    version,
    about = "Resolve AfreecaTV live channel pages into playable HLS streams"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "AFREECA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Proxy URL for all requests (http or https)
    #[arg(long, global = true, env = "AFREECA_PROXY")]
    pub proxy: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a channel page into its playable streams
    Resolve {
        /// Channel page URL, e.g. https://play.afreecatv.com/<channel>
        url: String,

        /// Only output the given quality (original, hd, sd)
        #[arg(short = 'Q', long)]
        quality: Option<QualityTier>,

        /// Output format, defaults to the configured one
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Override the player API endpoint
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Check whether a URL is handled and print its channel id
    Check {
        url: String,
    },

    /// Show configuration
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Print the configuration file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    JsonCompact,
    Table,
    Csv,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonCompact)
    }
}
