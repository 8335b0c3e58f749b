//! Property-based invariant tests for grid encoding and code generation.
//!
//! Verifies:
//! 1. encode output is exactly 4 x width x height bytes
//! 2. encode clamps channels and defaults alpha to 255
//! 3. decimal fragments are always rejected
//! 4. plain formatting keeps every cell's values in order
//! 5. any formatting history ends in the same text as a single final call
//! 6. aligned rows start every cell at the same column
//! 7. indentation only changes leading whitespace
//! 8. records restore byte-identical code

use datapixels::code::{CodeFactory, FormatOptions};
use datapixels::grid::{encode, ValidationErrorKind};
use datapixels::packed::PackedImage;
use proptest::prelude::*;
use serde_json::{json, Value};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_token() -> impl Strategy<Value = (String, [u32; 4], bool)> {
    (prop::array::uniform4(0u32..=400), any::<bool>(), prop_oneof![Just(","), Just(", "), Just(" ")])
        .prop_map(|(channels, with_alpha, sep)| {
            let shown = if with_alpha { &channels[..] } else { &channels[..3] };
            let token = shown.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(sep);
            (token, channels, with_alpha)
        })
}

/// A grid value plus, per cell, the channels written and whether alpha was.
fn arb_grid() -> impl Strategy<Value = (Value, Vec<([u32; 4], bool)>, usize, usize)> {
    (1usize..=6, 1usize..=6).prop_flat_map(|(w, h)| {
        prop::collection::vec(arb_token(), w * h).prop_map(move |tokens| {
            let rows: Vec<Value> = tokens
                .chunks(w)
                .map(|row| Value::Array(row.iter().map(|(t, _, _)| json!(t)).collect()))
                .collect();
            let cells = tokens.iter().map(|(_, c, a)| (*c, *a)).collect();
            (Value::Array(rows), cells, w, h)
        })
    })
}

fn arb_image() -> impl Strategy<Value = PackedImage> {
    (1u32..=5, 1u32..=5).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), (w * h * 4) as usize)
            .prop_map(move |data| PackedImage::new(data, w, h).unwrap())
    })
}

fn arb_options() -> impl Strategy<Value = FormatOptions> {
    (any::<bool>(), any::<bool>(), prop_oneof![Just(2usize), Just(4), Just(8)])
        .prop_map(|(align, describe, indentation)| FormatOptions { align, describe, indentation })
}

fn row_lines(code: &str) -> Vec<&str> {
    let lines: Vec<&str> = code.lines().collect();
    lines[1..lines.len() - 1].to_vec()
}

proptest! {
    #[test]
    fn encode_length_is_four_per_pixel((grid, _, w, h) in arb_grid()) {
        let image = encode(&grid).unwrap();
        prop_assert_eq!(image.data().len(), 4 * w * h);
        prop_assert_eq!((image.width() as usize, image.height() as usize), (w, h));
    }

    #[test]
    fn encode_clamps_and_fills_alpha((grid, cells, _, _) in arb_grid()) {
        let image = encode(&grid).unwrap();

        for (pixel, (expected, with_alpha)) in image.data().chunks(4).zip(&cells) {
            for i in 0..3 {
                prop_assert_eq!(pixel[i] as u32, expected[i].min(255));
            }
            let alpha = if *with_alpha { expected[3].min(255) } else { 255 };
            prop_assert_eq!(pixel[3] as u32, alpha);
        }
    }

    #[test]
    fn decimal_fragments_rejected(a in 0u32..300, b in 0u32..10, c in 0u32..300, d in 0u32..300) {
        let token = format!("{}.{},{},{}", a, b, c, d);
        let err = encode(&json!([[token]])).unwrap_err();
        prop_assert_eq!(err.kind(), ValidationErrorKind::BadColorFormat);
    }

    #[test]
    fn plain_format_keeps_values(image in arb_image()) {
        let mut factory = CodeFactory::generate("pixelData", &image);
        factory.format_code(false, false);

        let stripped: String = factory.code().chars().filter(|c| !c.is_whitespace()).collect();
        let cells: Vec<String> = stripped.split('"').skip(1).step_by(2).map(str::to_string).collect();
        let expected: Vec<String> = image
            .data()
            .chunks(4)
            .map(|c| format!("{},{},{},{}", c[0], c[1], c[2], c[3]))
            .collect();
        prop_assert_eq!(cells, expected);
    }

    #[test]
    fn format_history_does_not_matter(
        image in arb_image(),
        history in prop::collection::vec(arb_options(), 0..5),
        last in arb_options(),
    ) {
        let mut edited = CodeFactory::generate("pixelData", &image);
        for options in &history {
            edited.apply(options).unwrap();
        }
        edited.apply(&last).unwrap();

        let mut direct = CodeFactory::generate("pixelData", &image);
        direct.format_code(last.align, last.describe);
        direct.update_indentation(&last.indentation.to_string()).unwrap();

        prop_assert_eq!(edited.code(), direct.code());
    }

    #[test]
    fn aligned_cells_share_offsets(image in arb_image(), describe in any::<bool>()) {
        let mut factory = CodeFactory::generate("pixelData", &image);
        factory.format_code(true, describe);

        let offsets: Vec<Vec<usize>> = row_lines(factory.code())
            .iter()
            .map(|line| line.match_indices('"').map(|(i, _)| i).step_by(2).collect())
            .collect();
        for row in &offsets[1..] {
            prop_assert_eq!(row, &offsets[0]);
        }
    }

    #[test]
    fn indentation_only_touches_leading_space(image in arb_image(), spaces in prop_oneof![Just(2usize), Just(4), Just(8)]) {
        let mut factory = CodeFactory::generate("pixelData", &image);
        factory.format_code(true, true);
        let before: Vec<String> = row_lines(factory.code()).iter().map(|s| s.to_string()).collect();

        factory.update_indentation(&spaces.to_string()).unwrap();
        let indent = " ".repeat(spaces);
        for (line, original) in row_lines(factory.code()).iter().zip(&before) {
            prop_assert_eq!(line.to_string(), format!("{}{}", indent, original));
        }
    }

    #[test]
    fn record_restores_identical_code(image in arb_image(), options in arb_options()) {
        let mut factory = CodeFactory::generate("pixelData", &image);
        factory.apply(&options).unwrap();

        let restored = CodeFactory::from_json(&factory.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored, factory);
    }
}
