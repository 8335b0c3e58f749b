//! Variable names derived from file names

use once_cell::sync::Lazy;
use regex::Regex;

/// Default variable name for generated pixel data
pub const DEFAULT_VARIABLE_NAME: &str = "pixelData";

static ILLEGAL_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9$_]+").expect("identifier filter pattern is valid"));

/// Turn a file name into an identifier that is safe to use as a variable name.
///
/// The extension (everything from the first `.`) is dropped along with any
/// character that cannot appear in an identifier. If nothing is left,
/// `default_name` is returned; if the name starts with a digit it is prefixed
/// with `default_name`; otherwise its first letter is lower-cased.
///
/// ```
/// use datapixels::naming::clean_file_name;
///
/// assert_eq!(clean_file_name("3dSprite.png", "pixelData"), "pixelData3dSprite");
/// assert_eq!(clean_file_name("Hero Walk.gif", "pixelData"), "heroWalk");
/// ```
pub fn clean_file_name(file_name: &str, default_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    let cleaned = ILLEGAL_CHARACTERS.replace_all(stem, "");

    let mut chars = cleaned.chars();
    match chars.next() {
        None => default_name.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{}{}", default_name, cleaned),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Check that `name` can be used verbatim as a variable name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '$' || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '$' || c == '_')
        }
        _ => false,
    }
}
