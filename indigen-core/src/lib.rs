//! Core utilities and types for the indigen generator.
//!
//! This crate provides the file primitives and string helpers shared by
//! the manifest, codegen and CLI crates.

mod file;
mod utils;
mod version;

// File operations
pub use file::{FileRules, GENERATED_HEADER, GeneratedFile, append_file, create_file, write_file};
// String utilities
pub use utils::{c_string_literal, is_c_identifier, is_c_keyword, to_upper_snake_case};
pub use version::Version;
