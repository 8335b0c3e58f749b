//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod reformat;
mod sample;
mod validate;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::code::{Viewport, INDENTATION_CHOICES};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, DataPixelsConfig};
use crate::samples::SAMPLE_NAMES;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// DataPixels - Generate pixel art program code from images and color grids
#[derive(Parser)]
#[command(name = "datapixels")]
#[command(about = "DataPixels - Generate pixel art program code from images and color grids")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Formatting flags shared by commands that print code
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Visually align literal columns (true/false, default from config)
    #[arg(long)]
    pub align: Option<bool>,

    /// Prefix channel values with R:, G:, B:, A: (true/false, default from config)
    #[arg(long)]
    pub describe: Option<bool>,

    /// Spaces before each row: 2, 4 or 8
    #[arg(long, value_parser = parse_indentation)]
    pub indent: Option<usize>,

    /// Preview viewport the pixel size is computed for (e.g. "640x480")
    #[arg(long)]
    pub viewport: Option<Viewport>,

    /// Print only the array literal instead of the full program
    #[arg(long)]
    pub literal_only: bool,

    /// Configuration file (default: discovered datapixels.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate program code from an image (.png, .gif, .jpg) or a grid literal file
    Generate {
        /// Input image or grid literal
        input: PathBuf,

        /// Variable name for the pixel data (default: derived from the file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Import images above the configured pixel area limit
        #[arg(long)]
        allow_large: bool,

        /// Also write the code record (for later `reformat`) to this file
        #[arg(long)]
        record: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,
    },
    /// Reformat code previously generated with `--record`
    Reformat {
        /// Code record file
        record: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't update the record file
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        format: FormatArgs,
    },
    /// Check a grid literal file without generating code
    Validate {
        /// Grid literal file
        input: PathBuf,
    },
    /// Print a built-in sample (basic, mario, luigi, heart)
    Sample {
        /// Sample name
        #[arg(value_parser = SAMPLE_NAMES)]
        name: String,

        #[command(flatten)]
        format: FormatArgs,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, name, allow_large, record, output, format } => {
            generate::run_generate(
                &input,
                name.as_deref(),
                allow_large,
                record.as_deref(),
                output.as_deref(),
                &format,
            )
        }
        Commands::Reformat { record, output, dry_run, format } => {
            reformat::run_reformat(&record, output.as_deref(), dry_run, &format)
        }
        Commands::Validate { input } => validate::run_validate(&input),
        Commands::Sample { name, format } => sample::run_sample(&name, &format),
    }
}

fn parse_indentation(s: &str) -> Result<usize, String> {
    let spaces: usize = s.parse().map_err(|_| format!("'{}' is not a number of spaces", s))?;
    if INDENTATION_CHOICES.contains(&spaces) {
        Ok(spaces)
    } else {
        Err(format!("indentation must be one of {:?}", INDENTATION_CHOICES))
    }
}

/// Load the configuration and apply command-line overrides.
///
/// Prints the error and returns the exit code on failure.
pub(crate) fn effective_config(format: &FormatArgs) -> Result<DataPixelsConfig, ExitCode> {
    let mut config = match load_config(format.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    let overrides = CliOverrides {
        alignment: format.align,
        description: format.describe,
        indentation: format.indent,
        viewport: format.viewport.map(|v| (v.width, v.height)),
    };
    merge_cli_overrides(&mut config, &overrides);
    Ok(config)
}

/// Write generated content to a file, or print it to stdout.
pub(crate) fn emit(content: &str, output: Option<&Path>) -> Result<(), ExitCode> {
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, content) {
                eprintln!("Error: Failed to write '{}': {}", path.display(), e);
                return Err(ExitCode::from(EXIT_ERROR));
            }
            log::info!("wrote {} bytes to {}", content.len(), path.display());
            println!("Generated: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
