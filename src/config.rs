//! Configuration file support for ossprey-scan.
//!
//! Provides YAML-based configuration through `ossprey.config.yml` files and
//! merges it with command-line arguments, which always take precedence.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use ossprey_scan::prelude::{ScanMode, DEFAULT_SERVICE_URL};
use ossprey_scan::shared::Result;

pub const CONFIG_FILENAME: &str = "ossprey.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub mode: Option<String>,
    pub dry_run: Option<bool>,
    pub soft_error: Option<bool>,
    pub exclude_paths: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective settings after merging the config file with the command line
#[derive(Debug, Clone)]
pub struct Settings {
    pub url: String,
    pub project_path: PathBuf,
    pub mode: ScanMode,
    pub api_key: Option<String>,
    pub dry_run: bool,
    pub dry_run_malicious: bool,
    pub soft_error: bool,
    pub output: Option<PathBuf>,
    pub exclude_paths: Vec<PathBuf>,
}

impl Settings {
    /// Loads the config file (explicit or discovered) and merges it with `args`
    pub fn resolve(args: &Args) -> Result<Self> {
        let project_path = args.package.clone().unwrap_or_else(|| PathBuf::from("."));
        let file = match &args.config {
            Some(path) => Some(load_config_from_path(path)?),
            None => discover_config(&project_path)?,
        };
        Self::merge(args, project_path, file.unwrap_or_default())
    }

    fn merge(args: &Args, project_path: PathBuf, file: ConfigFile) -> Result<Self> {
        let mode = match (args.mode, file.mode.as_deref()) {
            (Some(mode), _) => mode,
            (None, Some(raw)) => raw.parse::<ScanMode>().map_err(anyhow::Error::msg)?,
            (None, None) => ScanMode::Auto,
        };

        let mut exclude_paths: Vec<PathBuf> = file
            .exclude_paths
            .unwrap_or_default()
            .into_iter()
            .map(PathBuf::from)
            .collect();
        exclude_paths.extend(args.exclude.iter().cloned());

        Ok(Self {
            url: args
                .url
                .clone()
                .or(file.url)
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            project_path,
            mode,
            api_key: args.api_key.clone().filter(|k| !k.trim().is_empty()),
            dry_run: args.dry_run || args.dry_run_malicious || file.dry_run.unwrap_or(false),
            dry_run_malicious: args.dry_run_malicious,
            soft_error: args.soft_error || file.soft_error.unwrap_or(false),
            output: args.output.clone(),
            exclude_paths,
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref mode) = config.mode {
        if let Err(e) = mode.parse::<ScanMode>() {
            bail!(
                "Invalid config: {}\n\n💡 Hint: 'mode' must be one of auto, python, npm or yarn.",
                e
            );
        }
    }
    if let Some(ref url) = config.url {
        if url.trim().is_empty() {
            bail!(
                "Invalid config: url must not be empty.\n\n💡 Hint: Remove the 'url' field to use the default service."
            );
        }
    }
    if let Some(ref paths) = config.exclude_paths {
        for (i, path) in paths.iter().enumerate() {
            if path.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_paths[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a path prefix such as \"build\" or \"/opt/cache\".",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ossprey-scan").chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
url: https://scanner.internal
mode: npm
dry_run: true
soft_error: true
exclude_paths:
  - build
  - /opt/cache
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.url.as_deref(), Some("https://scanner.internal"));
        assert_eq!(config.mode.as_deref(), Some("npm"));
        assert_eq!(config.dry_run, Some(true));
        assert_eq!(config.soft_error, Some(true));
        assert_eq!(
            config.exclude_paths.as_deref(),
            Some(&["build".to_string(), "/opt/cache".to_string()][..])
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "mode: python\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.mode.as_deref(), Some("python"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(format!("{}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_mode_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "mode: pipenv\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("Invalid mode"));
    }

    #[test]
    fn test_empty_exclude_path_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "exclude_paths:\n  - \"  \"\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("must not be empty"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "mode: auto\napi_key: secret\ngithub_comments: true\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("api_key"));
    }

    #[test]
    fn test_cli_values_win_over_file() {
        let file = ConfigFile {
            url: Some("https://from-file".to_string()),
            mode: Some("python".to_string()),
            exclude_paths: Some(vec!["vendor".to_string()]),
            ..Default::default()
        };
        let args = args(&["--url", "https://from-cli", "--mode", "yarn", "-e", "dist"]);

        let settings = Settings::merge(&args, PathBuf::from("."), file).unwrap();
        assert_eq!(settings.url, "https://from-cli");
        assert_eq!(settings.mode, ScanMode::Yarn);
        assert_eq!(
            settings.exclude_paths,
            vec![PathBuf::from("vendor"), PathBuf::from("dist")]
        );
    }

    #[test]
    fn test_file_fills_unset_values() {
        let file = ConfigFile {
            mode: Some("npm".to_string()),
            dry_run: Some(true),
            soft_error: Some(true),
            ..Default::default()
        };
        let settings = Settings::merge(&args(&[]), PathBuf::from("."), file).unwrap();
        assert_eq!(settings.mode, ScanMode::Npm);
        assert!(settings.dry_run);
        assert!(settings.soft_error);
    }

    #[test]
    fn test_malicious_dry_run_implies_dry_run() {
        let settings =
            Settings::merge(&args(&["--dry-run-malicious"]), PathBuf::from("."), ConfigFile::default())
                .unwrap();
        assert!(settings.dry_run);
        assert!(settings.dry_run_malicious);
    }
}
