//! Reformat command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::code::CodeFactory;

use super::{effective_config, emit, FormatArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the reformat command
pub fn run_reformat(
    record: &Path,
    output: Option<&Path>,
    dry_run: bool,
    format: &FormatArgs,
) -> ExitCode {
    let config = match effective_config(format) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let json = match std::fs::read_to_string(record) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: Cannot open record '{}': {}", record.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut factory = match CodeFactory::from_json(&json) {
        Ok(factory) => factory,
        Err(e) => {
            eprintln!("Error: {}: {}", record.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = factory.apply(&config.format_options()) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    if dry_run {
        log::info!("dry run, not updating {}", record.display());
    } else {
        let updated = match factory.to_json() {
            Ok(updated) => updated,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if let Err(e) = std::fs::write(record, updated) {
            eprintln!("Error: Failed to write '{}': {}", record.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        log::info!("updated record {}", record.display());
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
