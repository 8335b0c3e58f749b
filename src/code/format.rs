//! Array literal rendering
//!
//! Every view of the literal is rendered from the cell model, so formatting
//! is a pure function of `(cells, column widths, style, indentation)`.
//!
//! As generated (no style applied):
//!
//! ```text
//! const pixelData = [
//! ["255,0,0,255","0,255,0,255"],
//! ["0,0,255,255","0,0,0,0"]
//! ];
//! ```
//!
//! Aligned and described, indented by 4:
//!
//! ```text
//! const pixelData = [
//!     ["R:255, G:0, B:0, A:255", "R:0, G:255, B:0, A:255"],
//!     ["R:0, G:0, B:255, A:255", "R:0, G:0, B:0, A:0"    ]
//! ];
//! ```

use serde::{Deserialize, Serialize};

/// Declaration keyword of the generated literal
pub const CONSTANT: &str = "const";

/// Channel prefixes used when describing values
pub const CHANNEL_LABELS: [&str; 4] = ["R:", "G:", "B:", "A:"];

/// Indentation choices offered to users
pub const INDENTATION_CHOICES: [usize; 3] = [2, 4, 8];

/// Most spaces a row may be indented by
pub const MAX_INDENTATION: usize = 16;

/// Combined width of the four channel labels
const LABEL_WIDTH: usize = 8;

/// Spaces added inside a cell once formatted (`"1,2,3,4"` -> `"1, 2, 3, 4"`)
const CHANNEL_SPACING: usize = 3;

/// Alignment and description flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CodeStyle {
    /// Pad cells so columns line up in a fixed-width font
    pub align: bool,
    /// Prefix channel values with `R:`, `G:`, `B:`, `A:`
    pub describe: bool,
}

/// Style plus indentation, as chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatOptions {
    pub align: bool,
    pub describe: bool,
    pub indentation: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { align: true, describe: true, indentation: 4 }
    }
}

impl FormatOptions {
    pub fn style(&self) -> CodeStyle {
        CodeStyle { align: self.align, describe: self.describe }
    }
}

/// Everything needed to render one literal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Literal<'a> {
    pub variable_name: &'a str,
    pub width: usize,
    pub cells: &'a [[u8; 4]],
    pub column_widths: &'a [usize],
    pub style: Option<CodeStyle>,
    pub indentation: usize,
}

impl Literal<'_> {
    pub fn render(&self) -> String {
        let indent = " ".repeat(self.indentation);
        let rows: Vec<String> = self
            .cells
            .chunks(self.width.max(1))
            .map(|row| format!("{}[{}]", indent, self.render_row(row)))
            .collect();

        format!("{} {} = [\n{}\n];", CONSTANT, self.variable_name, rows.join(",\n"))
    }

    fn render_row(&self, row: &[[u8; 4]]) -> String {
        let style = match self.style {
            None => {
                let cells: Vec<String> = row.iter().map(raw_cell).collect();
                return cells.join(",");
            }
            Some(style) => style,
        };

        if !style.align {
            let cells: Vec<String> = row.iter().map(|c| styled_cell(c, style.describe)).collect();
            return cells.join(", ");
        }

        let label_width = if style.describe { LABEL_WIDTH } else { 0 };
        let last = row.len().saturating_sub(1);
        let mut out = String::new();
        for (column, channels) in row.iter().enumerate() {
            let mut text = styled_cell(channels, style.describe);
            let mut target = self.column_widths.get(column).copied().unwrap_or(0)
                + CHANNEL_SPACING
                + label_width;
            if column != last {
                text.push(',');
                target += 1;
            }
            out.push_str(&format!("{:<width$}", text, width = target));
        }
        out
    }
}

/// A cell as generated: `"r,g,b,a"`
pub(crate) fn raw_cell(channels: &[u8; 4]) -> String {
    format!("\"{},{},{},{}\"", channels[0], channels[1], channels[2], channels[3])
}

/// A cell once formatted: `"r, g, b, a"` or `"R:r, G:g, B:b, A:a"`
fn styled_cell(channels: &[u8; 4], describe: bool) -> String {
    let values: Vec<String> = channels
        .iter()
        .zip(CHANNEL_LABELS)
        .map(|(value, label)| if describe { format!("{}{}", label, value) } else { value.to_string() })
        .collect();
    format!("\"{}\"", values.join(", "))
}

/// Widest generated cell per column, counting its trailing comma.
///
/// The last column has no trailing comma, so its width is one less.
pub(crate) fn column_widths(cells: &[[u8; 4]], width: usize) -> Vec<usize> {
    let mut widths = vec![0usize; width];
    for row in cells.chunks(width.max(1)) {
        for (column, channels) in row.iter().enumerate() {
            let len = raw_cell(channels).len() + 1;
            if widths[column] < len {
                widths[column] = len;
            }
        }
    }
    if let Some(last) = widths.last_mut() {
        *last = last.saturating_sub(1);
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELLS: [[u8; 4]; 4] = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [0, 0, 0, 0]];

    fn literal(style: Option<CodeStyle>, indentation: usize) -> String {
        let widths = column_widths(&CELLS, 2);
        Literal {
            variable_name: "pixelData",
            width: 2,
            cells: &CELLS,
            column_widths: &widths,
            style,
            indentation,
        }
        .render()
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(column_widths(&CELLS, 2), vec![14, 13]);
        assert_eq!(column_widths(&CELLS, 4), vec![14, 14, 14, 9]);
        assert_eq!(column_widths(&CELLS[..1], 1), vec![13]);
    }

    #[test]
    fn test_raw_literal() {
        assert_eq!(
            literal(None, 0),
            "const pixelData = [\n[\"255,0,0,255\",\"0,255,0,255\"],\n[\"0,0,255,255\",\"0,0,0,0\"]\n];"
        );
    }

    #[test]
    fn test_plain_literal() {
        let style = CodeStyle { align: false, describe: false };
        assert_eq!(
            literal(Some(style), 4),
            "const pixelData = [\n    [\"255, 0, 0, 255\", \"0, 255, 0, 255\"],\n    [\"0, 0, 255, 255\", \"0, 0, 0, 0\"]\n];"
        );
    }

    #[test]
    fn test_aligned_literal() {
        let style = CodeStyle { align: true, describe: false };
        assert_eq!(
            literal(Some(style), 2),
            "const pixelData = [\n  [\"255, 0, 0, 255\", \"0, 255, 0, 255\"],\n  [\"0, 0, 255, 255\", \"0, 0, 0, 0\"    ]\n];"
        );
    }

    #[test]
    fn test_described_literal() {
        let style = CodeStyle { align: false, describe: true };
        let code = literal(Some(style), 0);
        assert!(code.contains("[\"R:255, G:0, B:0, A:255\", \"R:0, G:255, B:0, A:255\"]"));
    }

    #[test]
    fn test_aligned_described_literal() {
        let style = CodeStyle { align: true, describe: true };
        assert_eq!(
            literal(Some(style), 4),
            "const pixelData = [\n    [\"R:255, G:0, B:0, A:255\", \"R:0, G:255, B:0, A:255\"],\n    [\"R:0, G:0, B:255, A:255\", \"R:0, G:0, B:0, A:0\"    ]\n];"
        );
    }

    #[test]
    fn test_single_cell() {
        let widths = column_widths(&CELLS[..1], 1);
        let code = Literal {
            variable_name: "dot",
            width: 1,
            cells: &CELLS[..1],
            column_widths: &widths,
            style: Some(CodeStyle { align: true, describe: false }),
            indentation: 0,
        }
        .render();
        assert_eq!(code, "const dot = [\n[\"255, 0, 0, 255\"]\n];");
    }
}
