//! Configuration module for datapixels
//!
//! Provides types and parsing for `datapixels.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
