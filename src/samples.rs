//! Built-in sample programs and sprites

use std::collections::HashMap;

use crate::grid::{PixelGrid, ValidationError};

/// Starter program shown before anything has been generated
pub const BASIC_PROGRAM: &str = r#"import DataPixels from "./DataPixels.js";

const R = "255, 0, 0, 255";    //Red
const G = "0, 255, 0, 255";    //Green
const B = "0, 0, 255, 255";    //Blue
const _ = "0, 0, 0, 0";        //Transparent

const data = [[R, G],
              [B, _]];

const size = 100;

const dataPixels = new DataPixels(data, size).image;

document.body.appendChild(dataPixels);"#;

/// Names accepted by [`sample_grid`], plus `basic` for the program text
pub const SAMPLE_NAMES: [&str; 4] = ["basic", "mario", "luigi", "heart"];

const TRANSPARENT: &str = "0, 0, 0, 0";

const MARIO_ROWS: [&str; 16] = [
    "___CCCCC____",
    "__CCCCCCCCC_",
    "__BBBSSBS___",
    "_BSBSSSBSSS_",
    "_BSBBSSSBSSB",
    "_BBSSSSBBBB_",
    "___SSSSSSS__",
    "__CCOCCCC___",
    "_CCCOCCOCCC_",
    "CCCCOOOOCCCC",
    "WWCOYOOYOCWW",
    "WWWOOOOOOWWW",
    "WWOOOOOOOOWW",
    "__OOO__OOO__",
    "_BBB____BBB_",
    "BBBB____BBBB",
];

const HEART_ROWS: [&str; 12] = [
    "__$$$___$$$__",
    "_$HHH$_$YYZ$_",
    "$HHAHH$HHYYZ$",
    "$HAHHHHHHHYZ$",
    "$HAHHHHHHHYZ$",
    "$HHHHHHHHHYZ$",
    "_$HHHHHHHYZ$_",
    "__$HHHHHHY$__",
    "___$HHHHY$___",
    "____$HHY$____",
    "_____$Y$_____",
    "______$______",
];

/// A palette-aliased grid, the same shape a hand-written grid literal takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSprite {
    pub name: &'static str,
    pub palette: HashMap<char, String>,
    pub rows: Vec<String>,
}

impl SampleSprite {
    /// Resolve aliases into a pixel grid.
    pub fn to_grid(&self) -> Result<PixelGrid, ValidationError> {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|alias| {
                        self.palette.get(&alias).cloned().unwrap_or_else(|| alias.to_string())
                    })
                    .collect()
            })
            .collect();
        PixelGrid::new(rows)
    }
}

/// Mario (red hat and shirt) or Luigi (green).
pub fn mario_brother(is_mario: bool) -> SampleSprite {
    let main_color = if is_mario { "255, 0, 0" } else { "0, 180, 0" };
    let palette = HashMap::from([
        ('C', main_color.to_string()),
        ('B', "100, 50, 0".to_string()),
        ('S', "255, 200, 150".to_string()),
        ('O', "0, 0, 255".to_string()),
        ('Y', "255, 255, 0".to_string()),
        ('W', "255, 255, 255".to_string()),
        ('_', TRANSPARENT.to_string()),
    ]);

    SampleSprite {
        name: if is_mario { "mario" } else { "luigi" },
        palette,
        rows: MARIO_ROWS.iter().map(|r| r.to_string()).collect(),
    }
}

/// A heart of the given hue with lighter and darker shades.
///
/// Shades move each channel by `lightness` (or twice that) and saturate at
/// the channel bounds.
pub fn heart(red: u8, green: u8, blue: u8, lightness: u8) -> SampleSprite {
    let shade = |f: fn(u8, u8) -> u8, amount: u8| {
        format!("{}, {}, {}", f(red, amount), f(green, amount), f(blue, amount))
    };
    let double = lightness.saturating_mul(2);

    let palette = HashMap::from([
        ('H', format!("{}, {}, {}", red, green, blue)),
        ('A', shade(u8::saturating_add, double)),
        ('Y', shade(u8::saturating_sub, lightness)),
        ('Z', shade(u8::saturating_sub, double)),
        ('$', "0, 0, 0".to_string()),
        ('_', TRANSPARENT.to_string()),
    ]);

    SampleSprite { name: "heart", palette, rows: HEART_ROWS.iter().map(|r| r.to_string()).collect() }
}

/// Look up a sample sprite by name.
pub fn sample_grid(name: &str) -> Option<SampleSprite> {
    match name {
        "mario" => Some(mario_brother(true)),
        "luigi" => Some(mario_brother(false)),
        "heart" => Some(heart(200, 0, 50, 20)),
        _ => None,
    }
}
