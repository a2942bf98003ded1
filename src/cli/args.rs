use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use crate::io::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "dirmap")]
#[command(about = "Per-directory code metrics and inequality distributions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate per-file metric records into a directory report
    Analyze {
        /// JSON file with file records (`-` reads stdin)
        input: PathBuf,

        /// Configuration file (defaults to .dirmap.toml in the working directory or above)
        #[arg(short, long, env = "DIRMAP_CONFIG")]
        config: Option<PathBuf>,

        /// COCOMO preset, overriding the configuration
        #[arg(long)]
        preset: Option<String>,

        /// Keep test files in the numeric aggregates
        #[arg(long = "include-tests")]
        include_tests: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of aggregation workers (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "DIRMAP_JOBS")]
        jobs: usize,

        /// Aggregate on a single thread
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// List the available COCOMO presets
    Presets,

    /// Write a default .dirmap.toml to the working directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Analyze { verbosity, .. } => *verbosity,
            _ => 0,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
