//! Command implementations for the dirmap binary.
//!
//! - **analyze**: read records, aggregate them and write the report
//! - **init**: write a default configuration file
//! - **presets**: list the COCOMO presets

pub mod analyze;
pub mod init;
pub mod presets;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::{init_config, init_config_in};
pub use presets::list_presets;
