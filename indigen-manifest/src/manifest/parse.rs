//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Indicator, MAX_PARAMS, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "indigen.toml")
    }
}

impl Manifest {
    /// Parse an indigen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse an indigen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source.parse_error(e))?;
    validate_manifest(&manifest, &source)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, source: &SourceContext) -> Result<()> {
    if manifest.indicators.is_empty() {
        return Err(source.validation_error(
            "no indicators defined; add at least one [indicators.<name>] table",
            None,
        ));
    }

    let ctx = ParseContext::new(source);
    for indicator in &manifest.indicators {
        validate_indicator(&ctx, indicator)?;
    }
    Ok(())
}

fn validate_indicator<'a>(ctx: &ParseContext<'a>, indicator: &'a Indicator) -> Result<()> {
    let name = indicator.name.as_str();
    ctx.validate_indicator_name(name)?;

    let ctx = ctx.push(name);
    let header_span = ctx.find_table_span(name);

    if indicator.full_name.trim().is_empty() {
        return Err(ctx
            .source()
            .validation_error(format!("indicator '{}' has an empty full_name", name), header_span));
    }

    let lists = [
        ("inputs", &indicator.inputs, true),
        ("options", &indicator.options, false),
        ("outputs", &indicator.outputs, true),
    ];

    for (kind, names, required) in lists {
        if required && names.is_empty() {
            return Err(ctx.source().validation_error(
                format!("indicator '{}' must declare at least one entry in {}", name, kind),
                header_span,
            ));
        }
        if names.len() > MAX_PARAMS {
            return Err(ctx
                .source()
                .too_many_params_error(name, kind, names.len(), header_span));
        }
        for param in names {
            ctx.validate_param_name(param, kind)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, Category};

    const BASIC: &str = r#"
[library]
version = "0.9.2"

[indicators.sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
options = ["period"]
outputs = ["sma"]

[indicators.ema]
full_name = "Exponential Moving Average"
category = "overlay"
inputs = ["real"]
options = ["period"]
outputs = ["ema"]
capabilities = ["ref", "stream"]

[indicators.abs]
full_name = "Vector Absolute Value"
category = "simple"
inputs = ["real"]
outputs = ["abs"]
"#;

    #[test]
    fn test_preserves_manifest_order() {
        let manifest: Manifest = BASIC.parse().unwrap();
        let names: Vec<&str> = manifest.indicators.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["sma", "ema", "abs"]);
    }

    #[test]
    fn test_parses_indicator_fields() {
        let manifest: Manifest = BASIC.parse().unwrap();
        let ema = manifest.indicator("ema").unwrap();

        assert_eq!(ema.full_name, "Exponential Moving Average");
        assert_eq!(ema.category, Category::Overlay);
        assert!(ema.has(Capability::Reference));
        assert!(ema.has(Capability::Streaming));

        let abs = manifest.indicator("abs").unwrap();
        assert!(abs.options.is_empty());
        assert!(abs.capabilities.is_empty());
        assert_eq!(manifest.library.version.to_string(), "0.9.2");
    }

    #[test]
    fn test_rejects_empty_manifest() {
        let err = Manifest::from_str("[library]\nversion = \"1.0.0\"\n").unwrap_err();
        assert!(err.to_string().contains("no indicators"));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.sma]
full_name = "Simple Moving Average"
category = "oscillator"
inputs = ["real"]
outputs = ["sma"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_rejects_duplicate_indicator() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
outputs = ["sma"]

[indicators.sma]
full_name = "Again"
category = "overlay"
inputs = ["real"]
outputs = ["sma"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_rejects_uppercase_name() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.Sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
outputs = ["sma"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_rejects_keyword_param() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
options = ["int"]
outputs = ["sma"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_rejects_empty_full_name() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.sma]
full_name = "  "
category = "overlay"
inputs = ["real"]
outputs = ["sma"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(err.to_string().contains("empty full_name"));
    }

    #[test]
    fn test_rejects_missing_outputs() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(err.to_string().contains("outputs"));
    }

    #[test]
    fn test_rejects_too_many_options() {
        let options: Vec<String> = (0..=MAX_PARAMS).map(|i| format!("\"o{}\"", i)).collect();
        let src = format!(
            r#"
[library]
version = "1.0.0"

[indicators.wide]
full_name = "Too Wide"
category = "math"
inputs = ["real"]
options = [{}]
outputs = ["out"]
"#,
            options.join(", ")
        );
        let err = Manifest::from_str(&src).unwrap_err();
        assert!(matches!(*err, Error::TooManyParams { count: 11, .. }));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let src = r#"
[library]
version = "1.0.0"

[indicators.sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
outputs = ["sma"]
features = ["ref"]
"#;
        assert!(Manifest::from_str(src).is_err());
    }
}
