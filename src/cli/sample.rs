//! Sample command implementation

use std::process::ExitCode;

use crate::code::CodeFactory;
use crate::samples::{sample_grid, BASIC_PROGRAM};

use super::{effective_config, FormatArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the sample command
pub fn run_sample(name: &str, format: &FormatArgs) -> ExitCode {
    if name == "basic" {
        println!("{}", BASIC_PROGRAM);
        return ExitCode::from(EXIT_SUCCESS);
    }

    let Some(sprite) = sample_grid(name) else {
        eprintln!("Error: Unknown sample '{}'", name);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let config = match effective_config(format) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let image = match sprite.to_grid().and_then(|grid| grid.encode()) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: sample '{}': {}", name, e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut factory = CodeFactory::generate(sprite.name, &image);
    if let Err(e) = factory.apply(&config.format_options()) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    if format.literal_only {
        println!("{}", factory.code());
    } else {
        println!("{}", factory.render(&config.viewport()));
    }
    ExitCode::from(EXIT_SUCCESS)
}
