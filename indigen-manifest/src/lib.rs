// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `indigen.toml`.
//!
//! The manifest is the single source of truth for the generator: a library
//! version plus an ordered table of indicators. Table order in the file is
//! the manifest order used for header declarations.

mod error;
mod indicator;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use indicator::{Capabilities, Capability, Category, Indicator, MAX_PARAMS};
pub use manifest::{LibraryConfig, Manifest, ParseContext};
