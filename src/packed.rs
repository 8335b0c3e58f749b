//! Packed RGBA pixel buffers
//!
//! `PackedImage` is the bridge between validated pixel grids, decoded images,
//! and the code factory. The buffer is row-major RGBA, 4 bytes per pixel.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::grid::ValidationError;

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// A flat RGBA buffer with its dimensions.
///
/// Both dimensions are positive and the buffer length is always
/// `4 * width * height`; every constructor checks it, deserialization
/// included, so holders never need to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawImage")]
pub struct PackedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Unchecked wire form of [`PackedImage`]
#[derive(Deserialize)]
struct RawImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl TryFrom<RawImage> for PackedImage {
    type Error = ValidationError;

    fn try_from(raw: RawImage) -> Result<Self, Self::Error> {
        Self::new(raw.data, raw.width, raw.height)
    }
}

impl PackedImage {
    /// Wrap an RGBA buffer, rejecting empty dimensions and a length that
    /// does not match them.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::MalformedShape(format!(
                "image is {}x{}, both dimensions must be positive",
                width, height
            )));
        }

        // u32 x u32 fits in u64; only the channel factor can saturate.
        let expected = (width as u64 * height as u64).saturating_mul(CHANNELS as u64);
        let found = data.len() as u64;
        if found != expected {
            return Err(ValidationError::LengthMismatch { expected, found });
        }
        Ok(Self { data, width, height })
    }

    /// Copy the pixels of a decoded image.
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self, ValidationError> {
        Self::new(image.as_raw().clone(), image.width(), image.height())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`. Panics when out of bounds, like `RgbaImage::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        let offset = CHANNELS * (y as usize * self.width as usize + x as usize);
        let mut channels = [0u8; CHANNELS];
        channels.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Rgba(channels)
    }
}
