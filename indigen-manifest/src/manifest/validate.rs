//! Validation utilities for C identifiers

use indigen_core::{is_c_identifier, is_c_keyword};
use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Holds the source content plus the current path through the manifest
/// (e.g. `["sma"]` while validating the `sma` table), so nested checks can
/// name their location in error messages.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context for the given source.
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Get the source context.
    pub fn source(&self) -> &'a SourceContext {
        self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "option in 'sma'" or just "indicator" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of an `[indicators.<name>]` table header.
    pub fn find_table_span(&self, name: &str) -> Option<SourceSpan> {
        find_table_span(self.source.src(), name)
    }

    /// Validate an indicator name: a lowercase C identifier that is not a keyword.
    pub fn validate_indicator_name(&self, name: &str) -> Result<()> {
        let span = self.find_table_span(name);
        let kind = self.context_for("indicator");

        if is_c_keyword(name) {
            return Err(self.source.reserved_keyword_error(name, kind, span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(name, kind, reason, span));
        }

        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(self.source.invalid_identifier_error(
                name,
                kind,
                "indicator names are lowercase; they are used as file names and sort keys",
                span,
            ));
        }

        Ok(())
    }

    /// Validate an input, option, or output name.
    ///
    /// `kind` is the list the name came from ("inputs", "options", "outputs").
    pub fn validate_param_name(&self, name: &str, kind: &str) -> Result<()> {
        let span = find_param_span(self.source.src(), self.path.last().copied(), name);
        let kind = self.context_for(kind.trim_end_matches('s'));

        if is_c_keyword(name) {
            return Err(self.source.reserved_keyword_error(name, kind, span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(name, kind, reason, span));
        }

        Ok(())
    }
}

/// Validate that a name is a valid C identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }

    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Some("name must start with a letter or underscore"),
    }

    if !is_c_identifier(name) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Find the span of an indicator name in a `[indicators.<name>]` header.
pub(crate) fn find_table_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        format!("[indicators.{}]", name),
        format!("[indicators.\"{}\"]", name),
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            // Point at the name itself, skipping "[indicators." and an optional quote
            let start = pos + pattern.len() - 1 - name.len() - usize::from(pattern.ends_with("\"]"));
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    None
}

/// Find the span of a quoted parameter name, searching after the indicator's table header.
pub(crate) fn find_param_span(src: &str, indicator: Option<&str>, name: &str) -> Option<SourceSpan> {
    let offset = indicator
        .and_then(|ind| find_table_span(src, ind))
        .map(|span| span.offset())
        .unwrap_or(0);

    let quoted = format!("\"{}\"", name);
    src[offset..]
        .find(&quoted)
        .map(|pos| SourceSpan::from((offset + pos + 1, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("sma").is_none());
        assert!(validate_identifier("stoch_rsi").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("ma2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("2ma").is_some());
        assert!(validate_identifier("my-ind").is_some());
        assert!(validate_identifier("a.b").is_some());
    }

    #[test]
    fn test_find_table_span() {
        let src = "[indicators.sma]\ncategory = \"overlay\"";
        let span = find_table_span(src, "sma").unwrap();
        assert_eq!(span.offset(), 12);
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_find_table_span_quoted() {
        let src = "[indicators.\"sma\"]";
        let span = find_table_span(src, "sma").unwrap();
        assert_eq!(span.offset(), 13);
    }

    #[test]
    fn test_find_table_span_does_not_match_prefix() {
        let src = "[indicators.smaa]";
        assert!(find_table_span(src, "sma").is_none());
    }

    #[test]
    fn test_find_param_span_scoped_to_table() {
        let src = "[indicators.a]\ninputs = [\"real\"]\n\n[indicators.b]\ninputs = [\"real\"]\n";
        let span = find_param_span(src, Some("b"), "real").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "real");
        assert!(span.offset() > src.find("[indicators.b]").unwrap());
    }

    #[test]
    fn test_context_for() {
        let source = SourceContext::new("", "indigen.toml");
        let ctx = ParseContext::new(&source);
        assert_eq!(ctx.context_for("indicator"), "indicator");
        assert_eq!(ctx.push("sma").context_for("option"), "option in 'sma'");
    }

    #[test]
    fn test_validate_indicator_name_keyword() {
        let source = SourceContext::new("[indicators.int]", "indigen.toml");
        let err = ParseContext::new(&source)
            .validate_indicator_name("int")
            .unwrap_err();
        assert!(err.to_string().contains("reserved keyword"));
    }

    #[test]
    fn test_validate_param_name_reports_kind() {
        let source = SourceContext::new("", "indigen.toml");
        let ctx = ParseContext::new(&source).push("sma");
        let err = ctx.validate_param_name("9lives", "options").unwrap_err();
        assert_eq!(err.to_string(), "invalid option in 'sma' name '9lives'");
    }
}
