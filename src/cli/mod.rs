//! Command-line interface for dirmap
//!
//! - Argument parsing (`args`)
//! - Runtime setup such as logging (`setup`)

pub mod args;
pub mod setup;

pub use args::{parse_args, Cli, Commands, OutputFormat};
pub use setup::init_logging;
