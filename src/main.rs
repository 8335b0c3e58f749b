//! DataPixels - Command-line tool for generating pixel art program code

use std::process::ExitCode;

use datapixels::cli;

fn main() -> ExitCode {
    env_logger::init();
    cli::run()
}
