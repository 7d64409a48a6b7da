//! Generated file definitions.
//!
//! - [`IndicatorsHeader`] - `indicators.h`, rewritten on every run
//! - [`IndicatorsIndex`] - `indicators_index.c`, rewritten on every run
//! - [`stub`] - per-indicator scaffolding blocks

mod header;
mod index;
pub mod stub;

use std::time::{SystemTime, UNIX_EPOCH};

pub use header::{HEADER_FILE, IndicatorsHeader, declared_operations};
pub use index::{INDEX_FILE, IndicatorsIndex, MetadataRow, MetadataTable, SENTINEL_ROW};

/// Build metadata stamped into the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Library version label (`TI_VERSION`)
    pub version: String,
    /// Seconds since the Unix epoch at generation start (`TI_BUILD`)
    pub build: u64,
}

impl BuildInfo {
    pub fn new(version: impl Into<String>, build: u64) -> Self {
        Self {
            version: version.into(),
            build,
        }
    }

    /// Stamp `version` with the current wall-clock time.
    pub fn now(version: impl Into<String>) -> Self {
        let build = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::new(version, build)
    }
}
