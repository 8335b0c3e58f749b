//! Pixel grid validation and encoding
//!
//! A pixel grid is a rectangular array of color tokens, written by hand as an
//! array literal:
//!
//! ```text
//! [["255, 0, 0", "0, 255, 0"],
//!  ["0, 0, 255", "0, 0, 0, 0"]]
//! ```
//!
//! or as an object declaring palette aliases first:
//!
//! ```text
//! {
//!   palette: { R: "255, 0, 0", _: "0, 0, 0, 0" },
//!   grid: [["R", "_"], ["_", "R"]],
//! }
//! ```
//!
//! Literals are read with JSON5, so comments, single quotes, and trailing
//! commas are accepted. Validation always completes before any byte is packed.

use std::collections::HashMap;
use std::fmt;

use image::Rgba;
use serde_json::Value;
use thiserror::Error;

use crate::color::{parse_channels, ColorError};
use crate::packed::{PackedImage, CHANNELS};

/// Validation failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    Syntax,
    MalformedShape,
    RaggedRows,
    BadTokenType,
    BadColorFormat,
    LengthMismatch,
}

/// Error raised when a pixel grid cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The literal is not parseable at all
    #[error("invalid grid literal: {0}")]
    Syntax(String),
    /// Not a non-empty array of non-empty arrays
    #[error("malformed grid: {0}")]
    MalformedShape(String),
    /// A row's length differs from the first row's
    #[error("row {row} has {found} colors, expected {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },
    /// A color token is not a string
    #[error("{location} is {found}, expected a color string")]
    BadTokenType { location: String, found: &'static str },
    /// A color token is not 3 or 4 integer channels
    #[error("{location} has invalid color format \"{token}\": {source}")]
    BadColorFormat {
        location: String,
        token: String,
        #[source]
        source: ColorError,
    },
    /// Packed buffer does not hold exactly 4 bytes per pixel
    #[error("packed length {found} does not match 4 x width x height = {expected}")]
    LengthMismatch { expected: u64, found: u64 },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::Syntax(_) => ValidationErrorKind::Syntax,
            ValidationError::MalformedShape(_) => ValidationErrorKind::MalformedShape,
            ValidationError::RaggedRows { .. } => ValidationErrorKind::RaggedRows,
            ValidationError::BadTokenType { .. } => ValidationErrorKind::BadTokenType,
            ValidationError::BadColorFormat { .. } => ValidationErrorKind::BadColorFormat,
            ValidationError::LengthMismatch { .. } => ValidationErrorKind::LengthMismatch,
        }
    }
}

/// Where a token sits, for error messages.
#[derive(Debug, Clone, Copy)]
enum Location<'a> {
    Cell { row: usize, column: usize },
    Alias(&'a str),
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell { row, column } => write!(f, "color at row {}, column {}", row, column),
            Location::Alias(name) => write!(f, "palette alias '{}'", name),
        }
    }
}

/// A validated, rectangular grid of color tokens.
///
/// Construction checks the shape only; color formats are checked by
/// [`PixelGrid::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: Vec<Vec<String>>,
}

impl PixelGrid {
    /// Build a grid from rows of tokens, checking that it is non-empty and rectangular.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self, ValidationError> {
        let width = first_row_width(rows.len(), rows.first().map(Vec::len))?;
        for (row, tokens) in rows.iter().enumerate() {
            check_row_width(row, width, tokens.len())?;
        }
        Ok(Self { rows })
    }

    /// Build a grid from a JSON value, checking shape and token types.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::from_value_with_palette(value, &HashMap::new())
    }

    /// Read a grid literal: either a bare array of rows or an object with a
    /// `grid` array and an optional `palette` of aliases.
    pub fn parse(literal: &str) -> Result<Self, ValidationError> {
        let value: Value =
            json5::from_str(literal).map_err(|e| ValidationError::Syntax(e.to_string()))?;

        match &value {
            Value::Object(fields) => {
                let grid = fields.get("grid").ok_or_else(|| {
                    ValidationError::MalformedShape("object literal has no `grid` field".to_string())
                })?;
                let palette = match fields.get("palette") {
                    Some(palette) => parse_palette(palette)?,
                    None => HashMap::new(),
                };
                Self::from_value_with_palette(grid, &palette)
            }
            _ => Self::from_value(&value),
        }
    }

    fn from_value_with_palette(
        value: &Value,
        palette: &HashMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let rows = match value {
            Value::Array(rows) => rows,
            other => {
                return Err(ValidationError::MalformedShape(format!(
                    "expected an array of rows, found {}",
                    type_name(other)
                )))
            }
        };

        let first_len = match rows.first() {
            Some(Value::Array(first)) => Some(first.len()),
            Some(other) => {
                return Err(ValidationError::MalformedShape(format!(
                    "row 0 is {}, expected an array",
                    type_name(other)
                )))
            }
            None => None,
        };
        let width = first_row_width(rows.len(), first_len)?;

        let mut grid = Vec::with_capacity(rows.len());
        for (row, value) in rows.iter().enumerate() {
            let cells = match value {
                Value::Array(cells) => cells,
                other => {
                    return Err(ValidationError::MalformedShape(format!(
                        "row {} is {}, expected an array",
                        row,
                        type_name(other)
                    )))
                }
            };
            check_row_width(row, width, cells.len())?;

            let mut tokens = Vec::with_capacity(width);
            for (column, cell) in cells.iter().enumerate() {
                let token = match cell {
                    Value::String(token) => token,
                    other => {
                        return Err(ValidationError::BadTokenType {
                            location: Location::Cell { row, column }.to_string(),
                            found: type_name(other),
                        })
                    }
                };
                let resolved = palette.get(token).unwrap_or(token);
                tokens.push(resolved.clone());
            }
            grid.push(tokens);
        }

        Ok(Self { rows: grid })
    }

    /// Number of colors per row
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Validate every token and pack the grid into an RGBA buffer.
    ///
    /// All tokens are parsed before the buffer is assembled, so a failure
    /// never leaves a partially packed image behind.
    pub fn encode(&self) -> Result<PackedImage, ValidationError> {
        let mut colors: Vec<Rgba<u8>> = Vec::with_capacity(self.width() * self.height());
        for (row, tokens) in self.rows.iter().enumerate() {
            for (column, token) in tokens.iter().enumerate() {
                let color = parse_channels(token).map_err(|source| {
                    ValidationError::BadColorFormat {
                        location: Location::Cell { row, column }.to_string(),
                        token: token.clone(),
                        source,
                    }
                })?;
                colors.push(color);
            }
        }

        let data: Vec<u8> = colors.iter().flat_map(|color| color.0).collect();
        let byte_len = data.len();
        let (width, height) = (dimension(self.width())?, dimension(self.height())?);
        let packed = PackedImage::new(data, width, height)?;

        log::debug!(
            "encoded {}x{} pixel grid ({} bytes, {} per pixel)",
            width,
            height,
            byte_len,
            CHANNELS
        );
        Ok(packed)
    }
}

/// Validate a JSON grid value and pack it in one step.
pub fn encode(value: &Value) -> Result<PackedImage, ValidationError> {
    PixelGrid::from_value(value)?.encode()
}

/// Read a grid literal and pack it in one step.
pub fn encode_literal(literal: &str) -> Result<PackedImage, ValidationError> {
    PixelGrid::parse(literal)?.encode()
}

fn parse_palette(value: &Value) -> Result<HashMap<String, String>, ValidationError> {
    let aliases = match value {
        Value::Object(aliases) => aliases,
        other => {
            return Err(ValidationError::MalformedShape(format!(
                "palette is {}, expected an object of aliases",
                type_name(other)
            )))
        }
    };

    let mut palette = HashMap::with_capacity(aliases.len());
    for (name, color) in aliases {
        match color {
            Value::String(color) => {
                palette.insert(name.clone(), color.clone());
            }
            other => {
                return Err(ValidationError::BadTokenType {
                    location: Location::Alias(name).to_string(),
                    found: type_name(other),
                })
            }
        }
    }
    Ok(palette)
}

fn first_row_width(height: usize, first: Option<usize>) -> Result<usize, ValidationError> {
    match first {
        None if height == 0 => {
            Err(ValidationError::MalformedShape("grid has no rows".to_string()))
        }
        Some(0) | None => {
            Err(ValidationError::MalformedShape("first row has no colors".to_string()))
        }
        Some(width) => Ok(width),
    }
}

fn check_row_width(row: usize, expected: usize, found: usize) -> Result<(), ValidationError> {
    if found != expected {
        return Err(ValidationError::RaggedRows { row, expected, found });
    }
    Ok(())
}

fn dimension(len: usize) -> Result<u32, ValidationError> {
    u32::try_from(len).map_err(|_| {
        ValidationError::MalformedShape(format!("dimension {} exceeds the supported size", len))
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
