//! Program code generation from packed pixels
//!
//! [`CodeFactory`] turns a [`PackedImage`] into an editable array literal and
//! keeps it formatted as the user changes alignment, description, and
//! indentation settings. Formatting is always re-rendered from the cell
//! model, never by editing the previous output, so any sequence of format
//! calls ends in the same text as a single call with the final settings.

mod format;
mod record;
mod template;

use thiserror::Error;

use crate::packed::{PackedImage, CHANNELS};

pub use format::{
    CodeStyle, FormatOptions, CHANNEL_LABELS, CONSTANT, INDENTATION_CHOICES, MAX_INDENTATION,
};
pub use record::{CodeRecord, RecordError};
pub use template::{render_program, Viewport, CLASS_NAME, FRAME_VIEW_MARGIN, MODULE_PATH, PIXEL_SIZE};

use format::Literal;

/// Error for malformed formatting input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Indentation text is not a number of spaces
    #[error("invalid indentation '{0}', expected a number of spaces")]
    InvalidIndentation(String),
    /// Indentation beyond [`MAX_INDENTATION`]
    #[error("indentation of {0} spaces is more than the limit of {max}", max = MAX_INDENTATION)]
    IndentationTooLarge(String),
}

/// Generated program code for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFactory {
    variable_name: String,
    image_width: u32,
    image_height: u32,
    column_widths: Vec<usize>,
    cells: Vec<[u8; 4]>,
    style: Option<CodeStyle>,
    indentation: usize,
    code: String,
}

impl CodeFactory {
    /// Generate the unformatted literal for `image`, bound to `variable_name`.
    pub fn generate(variable_name: impl Into<String>, image: &PackedImage) -> Self {
        let cells: Vec<[u8; 4]> = image
            .data()
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        let width = image.width() as usize;

        let mut factory = Self {
            variable_name: variable_name.into(),
            image_width: image.width(),
            image_height: image.height(),
            column_widths: format::column_widths(&cells, width),
            cells,
            style: None,
            indentation: 0,
            code: String::new(),
        };
        factory.refresh();

        log::debug!(
            "generated literal '{}' for {}x{} image",
            factory.variable_name,
            factory.image_width,
            factory.image_height
        );
        factory
    }

    /// Reformat the literal with the given alignment and description.
    pub fn format_code(&mut self, align: bool, describe: bool) {
        self.set_style(CodeStyle { align, describe });
    }

    pub fn set_style(&mut self, style: CodeStyle) {
        self.style = Some(style);
        self.refresh();
    }

    /// Re-indent every row by the number of spaces written in `spaces`.
    ///
    /// Leaves the code untouched when `spaces` is not a digit string or
    /// exceeds [`MAX_INDENTATION`].
    pub fn update_indentation(&mut self, spaces: &str) -> Result<(), FormatError> {
        let trimmed = spaces.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidIndentation(spaces.to_string()));
        }
        // Digit runs too long for usize are over the limit too
        let count =
            trimmed.parse().map_err(|_| FormatError::IndentationTooLarge(trimmed.to_string()))?;
        self.set_indentation(count)
    }

    pub fn set_indentation(&mut self, spaces: usize) -> Result<(), FormatError> {
        self.indentation = check_indentation(spaces)?;
        self.refresh();
        Ok(())
    }

    /// Apply style and indentation in one pass.
    pub fn apply(&mut self, options: &FormatOptions) -> Result<(), FormatError> {
        let indentation = check_indentation(options.indentation)?;
        self.style = Some(options.style());
        self.indentation = indentation;
        self.refresh();
        Ok(())
    }

    /// The current array literal
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The literal wrapped in a runnable program sized for `viewport`.
    ///
    /// Does not change the literal.
    pub fn render(&self, viewport: &Viewport) -> String {
        let pixel_size = viewport.pixel_size(self.image_width, self.image_height);
        render_program(&self.variable_name, &self.code, pixel_size)
    }

    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Widest generated cell per column, used for alignment
    pub fn column_widths(&self) -> &[usize] {
        &self.column_widths
    }

    /// Style last applied, or `None` if the literal is still as generated
    pub fn style(&self) -> Option<CodeStyle> {
        self.style
    }

    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// Snapshot the full state for persistence.
    pub fn to_record(&self) -> CodeRecord {
        CodeRecord {
            variable_name: self.variable_name.clone(),
            image_width: self.image_width,
            image_height: self.image_height,
            column_widths: self.column_widths.clone(),
            code: self.code.clone(),
            style: self.style,
            indentation: self.indentation,
        }
    }

    /// Restore from a snapshot. The stored literal is kept verbatim until the
    /// next formatting call.
    pub fn from_record(record: CodeRecord) -> Result<Self, RecordError> {
        let cells = record.cells()?;
        log::debug!(
            "restored literal '{}' ({} cells) from record",
            record.variable_name,
            cells.len()
        );
        Ok(Self {
            variable_name: record.variable_name,
            image_width: record.image_width,
            image_height: record.image_height,
            column_widths: record.column_widths,
            cells,
            style: record.style,
            indentation: record.indentation,
            code: record.code,
        })
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        self.to_record().to_json()
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Self::from_record(CodeRecord::from_json(json)?)
    }

    fn refresh(&mut self) {
        self.code = Literal {
            variable_name: &self.variable_name,
            width: self.image_width as usize,
            cells: &self.cells,
            column_widths: &self.column_widths,
            style: self.style,
            indentation: self.indentation,
        }
        .render();
    }
}

fn check_indentation(spaces: usize) -> Result<usize, FormatError> {
    if spaces > MAX_INDENTATION {
        return Err(FormatError::IndentationTooLarge(spaces.to_string()));
    }
    Ok(spaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackedImage {
        PackedImage::new(vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 0, 0, 0, 0], 2, 2)
            .unwrap()
    }

    #[test]
    fn test_generate_raw_literal() {
        let factory = CodeFactory::generate("pixelData", &sample());
        assert_eq!(
            factory.code(),
            "const pixelData = [\n[\"255,0,0,255\",\"0,255,0,255\"],\n[\"0,0,255,255\",\"0,0,0,0\"]\n];"
        );
        assert_eq!(factory.column_widths(), &[14, 13]);
        assert_eq!(factory.style(), None);
    }

    #[test]
    fn test_format_is_idempotent() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        factory.format_code(true, true);
        let once = factory.code().to_string();
        factory.format_code(true, true);
        assert_eq!(factory.code(), once);
    }

    #[test]
    fn test_format_order_does_not_matter() {
        let mut a = CodeFactory::generate("pixelData", &sample());
        a.format_code(true, false);
        a.update_indentation("8").unwrap();
        a.format_code(false, true);

        let mut b = CodeFactory::generate("pixelData", &sample());
        b.update_indentation("8").unwrap();
        b.format_code(false, true);

        assert_eq!(a.code(), b.code());
    }

    #[test]
    fn test_update_indentation_replaces_previous() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        factory.update_indentation("4").unwrap();
        factory.update_indentation("2").unwrap();
        assert!(factory.code().contains("\n  [\""));
        assert!(!factory.code().contains("\n   "));
    }

    #[test]
    fn test_update_indentation_rejects_non_digits() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        let before = factory.code().to_string();
        assert_eq!(
            factory.update_indentation("four"),
            Err(FormatError::InvalidIndentation("four".to_string()))
        );
        assert!(factory.update_indentation("").is_err());
        assert!(factory.update_indentation("-2").is_err());
        assert_eq!(factory.code(), before);
    }

    #[test]
    fn test_apply_matches_separate_calls() {
        let options = FormatOptions { align: true, describe: false, indentation: 2 };
        let mut a = CodeFactory::generate("pixelData", &sample());
        a.apply(&options).unwrap();

        let mut b = CodeFactory::generate("pixelData", &sample());
        b.format_code(true, false);
        b.set_indentation(2).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        factory.apply(&FormatOptions::default()).unwrap();
        let before = factory.clone();
        let program = factory.render(&Viewport::new(100, 100));
        assert_eq!(factory, before);
        assert!(program.starts_with("import DataPixels from \"./DataPixels.js\";\n\n"));
        assert!(program.contains(factory.code()));
        assert!(program.contains("const pixelSize = 43;"));
        assert!(program.contains("const dp = new DataPixels(pixelData, pixelSize);"));
        assert!(program.ends_with("document.body.appendChild(dp.image);"));
    }

    #[test]
    fn test_record_round_trip() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        factory.apply(&FormatOptions { align: true, describe: true, indentation: 8 }).unwrap();

        let restored = CodeFactory::from_json(&factory.to_json().unwrap()).unwrap();
        assert_eq!(restored, factory);
    }

    #[test]
    fn test_restored_factory_reformats() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        factory.format_code(true, true);
        let mut restored = CodeFactory::from_record(factory.to_record()).unwrap();

        factory.format_code(false, false);
        restored.format_code(false, false);
        assert_eq!(restored.code(), factory.code());
    }

    #[test]
    fn test_indentation_limit() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        factory.update_indentation("16").unwrap();
        let before = factory.code().to_string();

        assert_eq!(
            factory.update_indentation("18446744073709551615"),
            Err(FormatError::IndentationTooLarge("18446744073709551615".to_string()))
        );
        assert_eq!(
            factory.update_indentation("99999999999999999999999"),
            Err(FormatError::IndentationTooLarge("99999999999999999999999".to_string()))
        );
        assert!(factory.update_indentation("17").is_err());
        assert!(factory.set_indentation(usize::MAX).is_err());
        assert_eq!(factory.indentation(), 16);
        assert_eq!(factory.code(), before);
    }

    #[test]
    fn test_apply_rejects_large_indentation() {
        let mut factory = CodeFactory::generate("pixelData", &sample());
        let before = factory.clone();
        let options = FormatOptions { align: true, describe: true, indentation: 1 << 40 };
        assert!(matches!(factory.apply(&options), Err(FormatError::IndentationTooLarge(_))));
        assert_eq!(factory, before);
    }

    #[test]
    fn test_record_with_huge_indentation_rejected() {
        let mut record = CodeFactory::generate("pixelData", &sample()).to_record();
        record.indentation = usize::MAX;
        assert!(matches!(
            CodeFactory::from_record(record),
            Err(RecordError::Indentation { found: usize::MAX, max: MAX_INDENTATION })
        ));
    }
}
