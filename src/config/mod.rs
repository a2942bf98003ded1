//! Engine configuration
//!
//! Configuration is immutable once loaded and is passed explicitly into the
//! classifier, aggregator and estimator; nothing reads it from global state.
//!
//! ```toml
//! cocomo_preset = "organic"
//! exclude_tests = true
//! tracked_metrics = ["lines_total", "lines_code", "complexity"]
//!
//! [classification]
//! exclude_patterns = ["docs/**"]
//!
//! [parallel]
//! max_concurrency = 4
//! ```

pub mod classification;
pub mod core;
pub mod loader;
pub mod parallel;

pub use classification::ClassificationConfig;
pub use self::core::DirmapConfig;
pub use loader::{discover_config, load_config, load_config_from, parse_config, CONFIG_FILE_NAME};
pub use parallel::ParallelConfig;
