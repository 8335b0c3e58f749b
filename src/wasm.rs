//! WASM API module for browser/JS interop
//!
//! Exposes grid validation and code generation to the editor front end.

use wasm_bindgen::prelude::*;

use crate::code::{CodeFactory, FormatOptions, Viewport};
use crate::grid::encode_literal;
use crate::naming::{self, DEFAULT_VARIABLE_NAME};
use crate::packed::PackedImage;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Result of encoding a grid literal to RGBA pixels.
#[wasm_bindgen]
pub struct EncodeResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl EncodeResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel, row-major)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

/// Validate and pack a grid literal.
///
/// Throws the validation message on malformed input.
#[wasm_bindgen]
pub fn encode_grid(literal: &str) -> Result<EncodeResult, JsValue> {
    let image = encode_literal(literal).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(EncodeResult { width: image.width(), height: image.height(), pixels: image.into_data() })
}

/// Generate a formatted program for packed RGBA pixels.
///
/// # Arguments
/// * `name` - Variable name for the pixel data
/// * `rgba` - Row-major RGBA bytes, `width * height * 4` long
/// * `viewport_width`, `viewport_height` - Preview area the pixel size is fitted to
#[wasm_bindgen]
pub fn generate_code(
    name: &str,
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    align: bool,
    describe: bool,
    indentation: usize,
    viewport_width: u32,
    viewport_height: u32,
) -> Result<String, JsValue> {
    let image =
        PackedImage::new(rgba, width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut factory = CodeFactory::generate(name, &image);
    factory
        .apply(&FormatOptions { align, describe, indentation })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(factory.render(&Viewport::new(viewport_width, viewport_height)))
}

/// Derive a variable name from an uploaded file name.
///
/// An empty `default_name` falls back to `pixelData`.
#[wasm_bindgen]
pub fn clean_file_name(file_name: &str, default_name: &str) -> String {
    let default_name = if default_name.is_empty() { DEFAULT_VARIABLE_NAME } else { default_name };
    naming::clean_file_name(file_name, default_name)
}
