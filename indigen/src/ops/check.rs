//! Check operation - manifest validation.

use std::{collections::HashSet, path::Path};

use indigen_codegen::Catalog;
use indigen_manifest::{Indicator, Manifest};

use crate::reports::CheckReport;

/// Local names every generated function body already uses.
const RESERVED_LOCALS: &[&str] = &["size", "inputs", "options", "outputs", "stream", "progress", "i"];

/// Execute the check operation.
///
/// Parsing has already validated each indicator; this re-checks the
/// catalog invariants and collects warnings about stubs that would not
/// compile even once their `#error` markers are resolved.
pub fn check(manifest: &Manifest, config_path: &Path) -> CheckReport {
    let mut errors = Vec::new();
    if let Err(e) = Catalog::new(&manifest.indicators) {
        errors.push(e.to_string());
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        indicator_count: manifest.indicators.len(),
        errors,
        warnings: lint(manifest),
    }
}

/// Warnings for every indicator in manifest order.
pub fn lint(manifest: &Manifest) -> Vec<String> {
    manifest.indicators.iter().flat_map(lint_indicator).collect()
}

/// Name clashes between the locals a stub unpacks.
fn lint_indicator(indicator: &Indicator) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    let params = indicator
        .inputs
        .iter()
        .chain(&indicator.options)
        .chain(&indicator.outputs);

    for param in params {
        if RESERVED_LOCALS.contains(&param.as_str()) {
            warnings.push(format!(
                "indicator '{}': '{}' shadows a parameter of the generated functions",
                indicator.name, param
            ));
        } else if !seen.insert(param.as_str()) {
            warnings.push(format!(
                "indicator '{}': '{}' is declared more than once across inputs, options and outputs",
                indicator.name, param
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use indigen_codegen::testing::{SAMPLE_MANIFEST, manifest};

    use super::*;

    #[test]
    fn test_sample_is_clean() {
        let report = check(&manifest(SAMPLE_MANIFEST), Path::new("indigen.toml"));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.indicator_count, 3);
    }

    #[test]
    fn test_warns_on_clashing_names() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.cross]
full_name = "Crossover"
category = "comparative"
inputs = ["a", "b"]
options = ["size"]
outputs = ["a"]
"#;
        let warnings = lint(&manifest(src));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("'size' shadows"));
        assert!(warnings[1].contains("'a' is declared more than once"));
    }
}
