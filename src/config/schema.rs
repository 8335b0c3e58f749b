//! Configuration schema types for `datapixels.toml`
//!
//! Defines the structure and validation rules for code generation settings.

use serde::{Deserialize, Serialize};

use crate::code::{FormatOptions, Viewport, FRAME_VIEW_MARGIN, INDENTATION_CHOICES};
use crate::import::{ImportOptions, DEFAULT_MAX_AREA};
use crate::naming::{is_identifier, DEFAULT_VARIABLE_NAME};

/// Generated code settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeConfig {
    /// Visually align literal columns
    #[serde(default = "default_true")]
    pub alignment: bool,
    /// Prefix channel values with R:, G:, B:, A:
    #[serde(default = "default_true")]
    pub description: bool,
    /// Spaces before each row (2, 4 or 8)
    #[serde(default = "default_indentation")]
    pub indentation: usize,
    /// Variable name used when none can be derived from a file name
    #[serde(default = "default_name")]
    pub default_name: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            alignment: true,
            description: true,
            indentation: default_indentation(),
            default_name: default_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_indentation() -> usize {
    4
}

fn default_name() -> String {
    DEFAULT_VARIABLE_NAME.to_string()
}

/// Preview viewport the pixel size is computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_width")]
    pub width: u32,
    #[serde(default = "default_preview_height")]
    pub height: u32,
    /// Fraction of the viewport the image may fill
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: default_preview_width(),
            height: default_preview_height(),
            margin: default_margin(),
        }
    }
}

fn default_preview_width() -> u32 {
    Viewport::default().width
}

fn default_preview_height() -> u32 {
    Viewport::default().height
}

fn default_margin() -> f64 {
    FRAME_VIEW_MARGIN
}

/// Image import settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Largest image area imported without `--allow-large`
    #[serde(default = "default_max_area")]
    pub max_area: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { max_area: default_max_area() }
    }
}

fn default_max_area() -> u64 {
    DEFAULT_MAX_AREA
}

/// Complete datapixels.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPixelsConfig {
    #[serde(default)]
    pub code: CodeConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default, rename = "import")]
    pub import_config: ImportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "code.indentation")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "datapixels.toml: '{}' {}", self.field, self.message)
    }
}

impl DataPixelsConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !INDENTATION_CHOICES.contains(&self.code.indentation) {
            errors.push(ConfigValidationError {
                field: "code.indentation".to_string(),
                message: format!("must be one of {:?}", INDENTATION_CHOICES),
            });
        }

        if !is_identifier(&self.code.default_name) {
            errors.push(ConfigValidationError {
                field: "code.default_name".to_string(),
                message: "must be a valid identifier".to_string(),
            });
        }

        if self.preview.width == 0 || self.preview.height == 0 {
            errors.push(ConfigValidationError {
                field: "preview".to_string(),
                message: "width and height must be positive".to_string(),
            });
        }

        if !(self.preview.margin > 0.0 && self.preview.margin <= 1.0) {
            errors.push(ConfigValidationError {
                field: "preview.margin".to_string(),
                message: "must be in (0, 1]".to_string(),
            });
        }

        if self.import_config.max_area == 0 {
            errors.push(ConfigValidationError {
                field: "import.max_area".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            align: self.code.alignment,
            describe: self.code.description,
            indentation: self.code.indentation,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.preview.width, self.preview.height).with_margin(self.preview.margin)
    }

    pub fn import_options(&self, allow_large: bool) -> ImportOptions {
        ImportOptions { max_area: self.import_config.max_area, allow_large }
    }
}
