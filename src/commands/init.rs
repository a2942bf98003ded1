use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DirmapConfig, CONFIG_FILE_NAME};

const HEADER: &str = "# dirmap configuration\n#\n# Every key is optional; missing keys use the defaults shown here.\n\n";

/// Write a default configuration file into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&DirmapConfig::default())
        .context("Failed to render default configuration")?;
    fs::write(&config_path, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Write a default configuration file into the working directory.
pub fn init_config(force: bool) -> Result<()> {
    let dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let path = init_config_in(&dir, force)?;
    println!("Created {}", path.display());
    Ok(())
}
