//! Persisted code factory state
//!
//! A record keeps the literal exactly as last shown, so restoring it never
//! needs the original pixels: the cell model is read back out of the literal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::{CodeStyle, MAX_INDENTATION};

static QUOTED_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("quoted cell pattern is valid"));

static CHANNEL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("channel value pattern is valid"));

/// Error restoring a code factory from a record
#[derive(Debug, Error)]
pub enum RecordError {
    /// Record is not valid JSON or misses fields
    #[error("Failed to read code record: {0}")]
    Json(#[from] serde_json::Error),
    /// Image has no pixels
    #[error("code record image is {width}x{height}, both dimensions must be positive")]
    Dimensions { width: u32, height: u32 },
    /// Column widths don't match the image width
    #[error("code record has {found} column widths for an image {expected} pixels wide")]
    ColumnWidths { expected: usize, found: usize },
    /// Literal holds a different number of cells than the dimensions imply
    #[error("code record literal has {found} cells, expected {expected}")]
    CellCount { expected: u64, found: u64 },
    /// Indentation beyond what the formatter accepts
    #[error("code record indentation {found} is more than the limit of {max}")]
    Indentation { found: usize, max: usize },
    /// A cell in the literal is not four 0-255 channels
    #[error("code record cell {index} is malformed: \"{cell}\"")]
    BadCell { index: usize, cell: String },
}

/// Plain, JSON-serializable snapshot of a code factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRecord {
    pub variable_name: String,
    pub image_width: u32,
    pub image_height: u32,
    pub column_widths: Vec<usize>,
    pub code: String,
    /// Style of `code`; absent until the literal was first formatted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CodeStyle>,
    #[serde(default)]
    pub indentation: usize,
}

impl CodeRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the record's dimensions against its own literal and read the cells back.
    pub(crate) fn cells(&self) -> Result<Vec<[u8; 4]>, RecordError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RecordError::Dimensions {
                width: self.image_width,
                height: self.image_height,
            });
        }
        let width = self.image_width as usize;
        if self.column_widths.len() != width {
            return Err(RecordError::ColumnWidths { expected: width, found: self.column_widths.len() });
        }
        if self.indentation > MAX_INDENTATION {
            return Err(RecordError::Indentation { found: self.indentation, max: MAX_INDENTATION });
        }

        // Only the array body holds cells; the name never contains quotes.
        let body = self.code.split_once('=').map_or(self.code.as_str(), |(_, body)| body);

        let mut cells = Vec::new();
        for (index, captures) in QUOTED_CELL.captures_iter(body).enumerate() {
            let cell = &captures[1];
            cells.push(parse_cell(cell).ok_or_else(|| RecordError::BadCell {
                index,
                cell: cell.to_string(),
            })?);
        }

        let expected = self.image_width as u64 * self.image_height as u64;
        let found = cells.len() as u64;
        if found != expected {
            return Err(RecordError::CellCount { expected, found });
        }
        Ok(cells)
    }
}

fn parse_cell(cell: &str) -> Option<[u8; 4]> {
    let mut channels = [0u8; 4];
    let mut values = CHANNEL_VALUE.find_iter(cell);
    for slot in channels.iter_mut() {
        *slot = values.next()?.as_str().parse().ok()?;
    }
    match values.next() {
        Some(_) => None,
        None => Some(channels),
    }
}
