//! Runnable program template around a generated literal

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Class the generated program instantiates
pub const CLASS_NAME: &str = "DataPixels";

/// Module the class is imported from
pub const MODULE_PATH: &str = "./DataPixels.js";

/// Name of the pixel size constant in the generated program
pub const PIXEL_SIZE: &str = "pixelSize";

/// Fraction of the preview viewport a rendered image may occupy
pub const FRAME_VIEW_MARGIN: f64 = 0.85;

/// Preview area the generated program will be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_margin() -> f64 {
    FRAME_VIEW_MARGIN
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 640, height: 480, margin: FRAME_VIEW_MARGIN }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, margin: FRAME_VIEW_MARGIN }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Size of one image pixel, in device pixels, for an image of the given
    /// dimensions to fit this viewport. Never less than 1.
    pub fn pixel_size(&self, image_width: u32, image_height: u32) -> u32 {
        let image_size = image_width.max(image_height).max(1) as f64;
        let frame_size = self.width.min(self.height) as f64 * self.margin;
        (frame_size / image_size).round().max(1.0) as u32
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `640x480`.
impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(&['x', 'X'][..])
            .ok_or_else(|| format!("invalid viewport '{}', expected WIDTHxHEIGHT", s))?;
        let width: u32 =
            width.trim().parse().map_err(|_| format!("invalid viewport width '{}'", width))?;
        let height: u32 =
            height.trim().parse().map_err(|_| format!("invalid viewport height '{}'", height))?;
        if width == 0 || height == 0 {
            return Err(format!("viewport '{}' must be non-empty", s));
        }
        Ok(Self::new(width, height))
    }
}

/// Wrap a literal into a program that imports the class, sizes the pixels,
/// instantiates the class, and mounts the resulting image.
pub fn render_program(variable_name: &str, literal: &str, pixel_size: u32) -> String {
    format!(
        "import {class} from \"{module}\";\n\n\
         {literal}\n\n\
         const {size_name} = {pixel_size};\n\n\
         const dp = new {class}({variable_name}, {size_name});\n\n\
         document.body.appendChild(dp.image);",
        class = CLASS_NAME,
        module = MODULE_PATH,
        literal = literal,
        size_name = PIXEL_SIZE,
        pixel_size = pixel_size,
        variable_name = variable_name,
    )
}
