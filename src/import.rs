//! Raster image import
//!
//! Decodes PNG, GIF, and JPEG files into a [`PackedImage`] so they can be
//! turned into code. Large images produce huge literals, so anything above
//! `max_area` pixels is refused unless explicitly allowed.

use std::io;
use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

use crate::grid::ValidationError;
use crate::packed::PackedImage;

/// Pixel count above which an import must be explicitly allowed
pub const DEFAULT_MAX_AREA: u64 = 10_000;

/// File extensions accepted for import
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "gif", "jpg", "jpeg"];

/// Error type for image import failures
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read image: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported image type '{0}', expected png, gif or jpg")]
    UnsupportedFormat(String),
    #[error("image is {width}x{height} ({area} pixels), more than the {max_area} pixel limit")]
    TooLarge { width: u32, height: u32, area: u64, max_area: u64 },
    #[error("Decoded image is unusable: {0}")]
    Invalid(#[from] ValidationError),
}

/// Import settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Largest accepted `width * height`
    pub max_area: u64,
    /// Accept images above `max_area` with a warning
    pub allow_large: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { max_area: DEFAULT_MAX_AREA, allow_large: false }
    }
}

/// Check whether a path has an importable image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode an image file into packed RGBA pixels.
pub fn import_image(path: &Path, options: &ImportOptions) -> Result<PackedImage, ImportError> {
    if !is_image_file(path) {
        let ext = path.extension().map(|e| e.to_string_lossy().into_owned()).unwrap_or_default();
        return Err(ImportError::UnsupportedFormat(ext));
    }

    let bytes = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_image(&bytes, options)
}

/// Decode an in-memory PNG, GIF, or JPEG into packed RGBA pixels.
pub fn decode_image(bytes: &[u8], options: &ImportOptions) -> Result<PackedImage, ImportError> {
    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Gif | ImageFormat::Jpeg) {
        return Err(ImportError::UnsupportedFormat(format!("{:?}", format).to_lowercase()));
    }

    let image = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
    let (width, height) = image.dimensions();
    check_area(width, height, options)?;

    Ok(PackedImage::from_rgba_image(&image)?)
}

fn check_area(width: u32, height: u32, options: &ImportOptions) -> Result<(), ImportError> {
    let area = width as u64 * height as u64;
    if area <= options.max_area {
        return Ok(());
    }

    if options.allow_large {
        log::warn!(
            "importing {}x{} image ({} pixels); the generated code will be very large",
            width,
            height,
            area
        );
        Ok(())
    } else {
        Err(ImportError::TooLarge { width, height, area, max_area: options.max_area })
    }
}
