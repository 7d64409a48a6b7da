//! List operation - indicators in index order.

use eyre::Result;
use indigen_codegen::{Catalog, declarations::index_constant};
use indigen_manifest::Manifest;

use crate::reports::{IndicatorEntry, ListReport};

pub fn list(manifest: &Manifest) -> Result<ListReport> {
    let catalog = Catalog::new(&manifest.indicators)?;

    let entries = catalog
        .in_name_order()
        .enumerate()
        .map(|(index, ind)| IndicatorEntry {
            index,
            constant: index_constant(&ind.name),
            name: ind.name.clone(),
            full_name: ind.full_name.clone(),
            category: ind.category.to_string(),
            capabilities: ind.capabilities.to_string(),
            counts: (ind.inputs.len(), ind.options.len(), ind.outputs.len()),
        })
        .collect();

    Ok(ListReport {
        version: manifest.library.version.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use indigen_codegen::testing::{SAMPLE_MANIFEST, manifest};

    use super::*;

    #[test]
    fn test_entries_in_index_order() {
        let report = list(&manifest(SAMPLE_MANIFEST)).unwrap();

        let names: Vec<(usize, &str)> = report
            .entries
            .iter()
            .map(|e| (e.index, e.name.as_str()))
            .collect();
        assert_eq!(names, vec![(0, "abs"), (1, "ema"), (2, "sma")]);

        let ema = &report.entries[1];
        assert_eq!(ema.constant, "TI_INDICATOR_EMA_INDEX");
        assert_eq!(ema.capabilities, "ref, stream");
        assert_eq!(report.entries[0].capabilities, "none");
        assert_eq!(report.entries[0].counts, (1, 0, 1));
    }
}
