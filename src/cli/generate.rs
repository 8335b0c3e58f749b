//! Generate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::code::CodeFactory;
use crate::config::DataPixelsConfig;
use crate::grid::encode_literal;
use crate::import::{import_image, is_image_file};
use crate::naming::{clean_file_name, is_identifier};
use crate::packed::PackedImage;

use super::{effective_config, emit, FormatArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the generate command
pub fn run_generate(
    input: &Path,
    name: Option<&str>,
    allow_large: bool,
    record: Option<&Path>,
    output: Option<&Path>,
    format: &FormatArgs,
) -> ExitCode {
    let config = match effective_config(format) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let variable_name = match name {
        Some(name) if !is_identifier(name) => {
            eprintln!("Error: '{}' is not a valid variable name", name);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Some(name) => name.to_string(),
        None => {
            let file_name = input.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            clean_file_name(&file_name, &config.code.default_name)
        }
    };

    let image = match load_input(input, allow_large, &config) {
        Ok(image) => image,
        Err(code) => return code,
    };

    let mut factory = CodeFactory::generate(variable_name, &image);
    if let Err(e) = factory.apply(&config.format_options()) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    log::info!(
        "generated '{}' from {} ({}x{})",
        factory.variable_name(),
        input.display(),
        factory.image_width(),
        factory.image_height()
    );

    if let Some(record_path) = record {
        let json = match factory.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if let Err(e) = std::fs::write(record_path, json) {
            eprintln!("Error: Failed to write '{}': {}", record_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        log::info!("saved record to {}", record_path.display());
    }

    let content = if format.literal_only {
        factory.code().to_string()
    } else {
        factory.render(&config.viewport())
    };

    match emit(&content, output) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(code) => code,
    }
}

fn load_input(
    input: &Path,
    allow_large: bool,
    config: &DataPixelsConfig,
) -> Result<PackedImage, ExitCode> {
    if is_image_file(input) {
        return import_image(input, &config.import_options(allow_large)).map_err(|e| {
            eprintln!("Error: {}: {}", input.display(), e);
            ExitCode::from(EXIT_ERROR)
        });
    }

    let literal = std::fs::read_to_string(input).map_err(|e| {
        eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
        ExitCode::from(EXIT_ERROR)
    })?;

    encode_literal(&literal).map_err(|e| {
        eprintln!("Error: {}: {}", input.display(), e);
        ExitCode::from(EXIT_ERROR)
    })
}
