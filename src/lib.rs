//! DataPixels - Library for turning pixel art into program code
//!
//! This library provides functionality to:
//! - Validate hand-written color grids and pack them into RGBA bytes
//! - Import PNG, GIF and JPEG images as packed pixels
//! - Generate an array literal from packed pixels and keep it formatted
//!   (alignment, channel labels, indentation)
//! - Wrap the literal in a runnable program and persist editor state

pub mod cli;
pub mod code;
pub mod color;
pub mod config;
pub mod grid;
pub mod import;
pub mod naming;
pub mod packed;
pub mod samples;

#[cfg(feature = "wasm")]
pub mod wasm;
