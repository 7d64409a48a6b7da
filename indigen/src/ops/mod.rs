//! Core operations.
//!
//! This module contains the business logic for indigen commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;
pub mod list;

pub use bake::{BakeOptions, bake};
pub use check::check;
pub use list::list;
