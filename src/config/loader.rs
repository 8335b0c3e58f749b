//! Configuration loading and discovery for `datapixels.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::DataPixelsConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when discovering configuration
pub const CONFIG_FILE_NAME: &str = "datapixels.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse datapixels.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override column alignment
    pub alignment: Option<bool>,
    /// Override channel description
    pub description: Option<bool>,
    /// Override row indentation
    pub indentation: Option<usize>,
    /// Override preview viewport size
    pub viewport: Option<(u32, u32)>,
}

/// Find datapixels.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for datapixels.toml
/// 2. Check XDG_CONFIG_HOME/datapixels/datapixels.toml (or ~/.config/datapixels/datapixels.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find datapixels.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("datapixels").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find datapixels.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a datapixels.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/datapixels.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<DataPixelsConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(DataPixelsConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<DataPixelsConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: DataPixelsConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut DataPixelsConfig, overrides: &CliOverrides) {
    if let Some(alignment) = overrides.alignment {
        config.code.alignment = alignment;
    }

    if let Some(description) = overrides.description {
        config.code.description = description;
    }

    if let Some(indentation) = overrides.indentation {
        config.code.indentation = indentation;
    }

    if let Some((width, height)) = overrides.viewport {
        config.preview.width = width;
        config.preview.height = height;
    }
}
