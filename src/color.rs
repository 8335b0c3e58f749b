//! Color token parsing
//!
//! A color token is a string carrying three or four 0-255 integer channels,
//! e.g. `"255, 0, 0"` (RGB, opaque) or `"0, 0, 0, 0"` (RGBA). Anything that is
//! not a digit separates channels.

use image::Rgba;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Matches integer and decimal fragments alike so decimals can be rejected
/// instead of being silently split into two integers. ASCII digits only;
/// other scripts' digits separate channels.
static NUMERIC_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[0-9]*\.)?[0-9]+").expect("numeric fragment pattern is valid"));

/// Alpha used when a token only carries RGB channels
pub const OPAQUE: u8 = 255;

/// Error type for color token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Token contains no numeric channel at all
    #[error("no color channels found")]
    NoChannels,
    /// A numeric fragment is not a base-10 integer (e.g. `1.5`)
    #[error("channel '{0}' is not an integer")]
    NonInteger(String),
    /// Token has the wrong number of channels
    #[error("expected 3 or 4 channels, found {0}")]
    ChannelCount(usize),
}

/// Parse a color token into an RGBA color.
///
/// Missing alpha defaults to 255. Channel values above 255 are clamped.
///
/// ```
/// use datapixels::color::parse_channels;
///
/// assert_eq!(parse_channels("255, 0, 0").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_channels("0,0,0,0").unwrap(), image::Rgba([0, 0, 0, 0]));
/// assert!(parse_channels("1.5, 2, 3").is_err());
/// ```
pub fn parse_channels(token: &str) -> Result<Rgba<u8>, ColorError> {
    let fragments: Vec<&str> = NUMERIC_FRAGMENT.find_iter(token).map(|m| m.as_str()).collect();

    if fragments.is_empty() {
        return Err(ColorError::NoChannels);
    }

    if let Some(bad) = fragments.iter().find(|f| !f.bytes().all(|b| b.is_ascii_digit())) {
        return Err(ColorError::NonInteger((*bad).to_string()));
    }

    if fragments.len() < 3 || fragments.len() > 4 {
        return Err(ColorError::ChannelCount(fragments.len()));
    }

    let mut channels = [0, 0, 0, OPAQUE];
    for (slot, fragment) in channels.iter_mut().zip(&fragments) {
        *slot = clamp_channel(fragment);
    }

    Ok(Rgba(channels))
}

/// Clamp a digit run to the 0-255 channel range.
///
/// Runs too long for `u32` saturate as well.
fn clamp_channel(digits: &str) -> u8 {
    match digits.parse::<u32>() {
        Ok(value) => value.min(u8::MAX as u32) as u8,
        Err(_) => u8::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_ascii_digits_separate_channels() {
        // U+0664 ARABIC-INDIC DIGIT FOUR
        assert_eq!(parse_channels("1,2,3,\u{0664}"), Ok(Rgba([1, 2, 3, 255])));
        assert_eq!(parse_channels("1\u{0664}2\u{0664}3"), Ok(Rgba([1, 2, 3, 255])));
        assert_eq!(parse_channels("\u{0661}\u{0662}\u{0663}"), Err(ColorError::NoChannels));
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        assert_eq!(parse_channels("255, 0, 0"), Ok(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_rgba_keeps_alpha() {
        assert_eq!(parse_channels("10,20,30,40"), Ok(Rgba([10, 20, 30, 40])));
    }

    #[test]
    fn test_whitespace_separators() {
        assert_eq!(parse_channels("  1   2\t3 "), Ok(Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(parse_channels("300, 256, 255"), Ok(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_channels("99999999999999, 0, 0"), Ok(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_decimal_fragment_rejected() {
        assert_eq!(parse_channels("1.5,2,3"), Err(ColorError::NonInteger("1.5".to_string())));
        assert_eq!(parse_channels("0, .5, 0"), Err(ColorError::NonInteger(".5".to_string())));
    }

    #[test]
    fn test_channel_count() {
        assert_eq!(parse_channels("1, 2"), Err(ColorError::ChannelCount(2)));
        assert_eq!(parse_channels("1, 2, 3, 4, 5"), Err(ColorError::ChannelCount(5)));
    }

    #[test]
    fn test_no_channels() {
        assert_eq!(parse_channels(""), Err(ColorError::NoChannels));
        assert_eq!(parse_channels("red"), Err(ColorError::NoChannels));
    }
}
