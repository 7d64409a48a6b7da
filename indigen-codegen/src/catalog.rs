//! The two orderings of the indicator set.
//!
//! Documentation and declarations follow manifest order. The metadata
//! table and the index constants follow name order, which is what lets
//! `ti_find_indicator` binary-search the table.

use indigen_manifest::Indicator;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no indicators to generate")]
    Empty,

    #[error("indicator '{0}' is defined more than once")]
    DuplicateName(String),
}

/// An immutable view of the indicator definitions in both orders.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    indicators: &'a [Indicator],
    /// Positions into `indicators`, sorted by name
    sorted: Vec<usize>,
}

impl<'a> Catalog<'a> {
    pub fn new(indicators: &'a [Indicator]) -> Result<Self, CatalogError> {
        if indicators.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut sorted: Vec<usize> = (0..indicators.len()).collect();
        sorted.sort_by(|&a, &b| indicators[a].name.cmp(&indicators[b].name));

        if let Some(pair) = sorted
            .windows(2)
            .find(|w| indicators[w[0]].name == indicators[w[1]].name)
        {
            return Err(CatalogError::DuplicateName(indicators[pair[0]].name.clone()));
        }

        Ok(Self { indicators, sorted })
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Indicators in the order they were declared.
    pub fn in_manifest_order(&self) -> impl Iterator<Item = &'a Indicator> + '_ {
        self.indicators.iter()
    }

    /// Indicators sorted ascending by name (byte-wise).
    pub fn in_name_order(&self) -> impl Iterator<Item = &'a Indicator> + '_ {
        self.sorted.iter().map(|&i| &self.indicators[i])
    }

    /// Position of `name` in name order. This is the value bound to the
    /// indicator's index constant.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.sorted
            .binary_search_by(|&i| self.indicators[i].name.as_str().cmp(name))
            .ok()
    }
}
