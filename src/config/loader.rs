use std::fs;
use std::path::{Path, PathBuf};

use super::core::DirmapConfig;
use crate::core::{Error, Result, ResultExt};

/// Config file name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".dirmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<DirmapConfig> {
    let config = toml::from_str::<DirmapConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an explicit path; every failure is an error.
pub fn load_config_from(path: &Path) -> Result<DirmapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read {}", path.display()))?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Try loading config from a discovered path.
///
/// A missing file yields `Ok(None)`; a file that exists but cannot be read,
/// parsed or validated is an error.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Result<Option<DirmapConfig>> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::from(e)).context(format!("Failed to read {}", config_path.display()));
        }
    };

    let config = parse_config(&contents)
        .context(format!("Invalid config file {}", config_path.display()))?;
    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(Some(config))
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
///
/// The nearest file wins; an invalid nearest file is an error rather than a
/// reason to keep searching.
pub fn discover_config(start: &Path) -> Result<Option<DirmapConfig>> {
    for path in directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
    {
        if let Some(config) = try_load_config_from_path(&path)? {
            return Ok(Some(config));
        }
    }
    Ok(None)
}

/// Load configuration from the working directory hierarchy, or defaults when
/// no config file exists.
pub fn load_config() -> Result<DirmapConfig> {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(DirmapConfig::default());
        }
    };

    Ok(discover_config(&current)?.unwrap_or_else(|| {
        tracing::debug!(
            "No config found after checking {} directories. Using default config.",
            MAX_TRAVERSAL_DEPTH
        );
        DirmapConfig::default()
    }))
}
