//! Validate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::grid::PixelGrid;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the validate command
pub fn run_validate(input: &Path) -> ExitCode {
    let literal = match std::fs::read_to_string(input) {
        Ok(literal) => literal,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match PixelGrid::parse(&literal).and_then(|grid| grid.encode()) {
        Ok(image) => {
            println!("Valid: {}x{} ({} bytes)", image.width(), image.height(), image.data().len());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            log::debug!("{} failed with {:?}", input.display(), e.kind());
            eprintln!("Error: {}: {}", input.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
