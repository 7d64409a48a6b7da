//! Manifest types and parsing for indigen.toml files.

mod parse;
mod validate;

use indexmap::IndexMap;
use indigen_core::Version;
use serde::{Deserialize, Deserializer};
pub use validate::ParseContext;

use crate::{Capabilities, Category, Indicator};

/// Root manifest for indigen.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Library metadata
    pub library: LibraryConfig,

    /// Indicators in manifest (file) order
    #[serde(default, deserialize_with = "deserialize_indicators")]
    pub indicators: Vec<Indicator>,
}

/// `[library]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Version label emitted as `TI_VERSION`
    pub version: Version,
}

impl Manifest {
    /// Look up an indicator by name.
    pub fn indicator(&self, name: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|ind| ind.name == name)
    }
}

/// Body of an `[indicators.<name>]` table; the name is the table key.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IndicatorTable {
    full_name: String,
    category: Category,
    #[serde(default)]
    inputs: Vec<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    outputs: Vec<String>,
    #[serde(default)]
    capabilities: Capabilities,
}

fn deserialize_indicators<'de, D>(deserializer: D) -> Result<Vec<Indicator>, D::Error>
where
    D: Deserializer<'de>,
{
    let tables: IndexMap<String, IndicatorTable> = IndexMap::deserialize(deserializer)?;

    Ok(tables
        .into_iter()
        .map(|(name, table)| Indicator {
            name,
            full_name: table.full_name,
            category: table.category,
            inputs: table.inputs,
            options: table.options,
            outputs: table.outputs,
            capabilities: table.capabilities,
        })
        .collect())
}
