//! C code generation for indigen.
//!
//! Produces the public header, the sorted metadata/index source and the
//! per-indicator stub files from a [`Manifest`](indigen_manifest::Manifest).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`declarations`] - Entry point signatures shared by all outputs
//! - [`catalog`] - Manifest order and name order over the indicator set
//! - [`files`] - `indicators.h`, `indicators_index.c` and stub blocks
//! - [`scaffold`] - Append-only stub planning and writing
//! - [`vcs`] - Version-control staging
//! - [`generator`] - Runs everything for one manifest
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod catalog;
pub mod declarations;
mod dialect;
pub mod files;
pub mod generator;
pub mod scaffold;
pub mod vcs;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use catalog::{Catalog, CatalogError};
pub use dialect::Dialect;
pub use files::BuildInfo;
pub use generator::{GenerateResult, Generator, Preview, PreviewFile};
pub use scaffold::{StubChange, StubOutcome, StubPlan};
pub use vcs::{Git, NoVcs, VersionControl};
