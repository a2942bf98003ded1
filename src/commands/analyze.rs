use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::{self, DirmapConfig};
use crate::io::{create_writer, read_records, read_records_from, OutputFormat};
use crate::pipeline;

pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub include_tests: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub jobs: usize,
    pub no_parallel: bool,
}

/// Apply command-line overrides on top of the file configuration.
pub fn apply_overrides(mut base: DirmapConfig, options: &AnalyzeConfig) -> DirmapConfig {
    if let Some(preset) = &options.preset {
        base.cocomo_preset = preset.clone();
    }
    if options.include_tests {
        base.exclude_tests = false;
    }
    if options.jobs > 0 {
        base.parallel.max_concurrency = Some(options.jobs);
    }
    if options.no_parallel {
        base.parallel.enabled = false;
    }
    base
}

pub fn handle_analyze(options: AnalyzeConfig) -> Result<()> {
    let base = match &options.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => config::load_config().context("Failed to load discovered config")?,
    };
    let dirmap_config = apply_overrides(base, &options);

    let records = if options.input.as_os_str() == "-" {
        read_records_from(io::stdin().lock()).context("Failed to read records from stdin")?
    } else {
        read_records(&options.input)
            .with_context(|| format!("Failed to read records from {}", options.input.display()))?
    };

    let report = pipeline::analyze(records, &dirmap_config)?;

    let target: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };
    create_writer(options.format, target).write_report(&report)?;

    if let Some(path) = &options.output {
        tracing::info!(path = %path.display(), "Report written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> AnalyzeConfig {
        AnalyzeConfig {
            input: dir.path().join("records.json"),
            config: None,
            preset: None,
            include_tests: false,
            format: OutputFormat::Json,
            output: Some(dir.path().join("report.json")),
            jobs: 0,
            no_parallel: false,
        }
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let opts = AnalyzeConfig {
            preset: Some("embedded".into()),
            include_tests: true,
            jobs: 3,
            no_parallel: true,
            ..options(&dir)
        };
        let config = apply_overrides(DirmapConfig::default(), &opts);
        assert_eq!(config.cocomo_preset, "embedded");
        assert!(!config.exclude_tests);
        assert_eq!(config.parallel.max_concurrency, Some(3));
        assert!(!config.parallel.enabled);
    }

    #[test]
    fn test_handle_analyze_writes_report() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("records.json"),
            r#"[{"path": "src/a.py", "language": "Python", "lines_code": 10}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("dirmap.toml"), "cocomo_preset = \"sme\"\n").unwrap();

        let opts = AnalyzeConfig {
            config: Some(dir.path().join("dirmap.toml")),
            ..options(&dir)
        };
        handle_analyze(opts).unwrap();

        let written = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["cocomo"]["preset_name"], "sme");
        assert_eq!(value["directories"][1]["path"], "src");
    }

    #[test]
    fn test_handle_analyze_missing_input() {
        let dir = TempDir::new().unwrap();
        let err = handle_analyze(options(&dir)).unwrap_err();
        assert!(err.to_string().contains("Failed to read records"));
    }
}
