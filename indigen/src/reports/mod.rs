//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod bake;
mod check;
mod list;
mod output;

pub use bake::{BakeReport, GenerationResult, PreviewFile, PreviewResult, StubPreview, WrittenResult};
pub use check::CheckReport;
pub use list::{IndicatorEntry, ListReport};
pub use output::{Report, TerminalOutput};
