//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of indicators defined.
    pub indicator_count: usize,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} indicator{})",
                self.config_path.display(),
                self.indicator_count,
                if self.indicator_count == 1 { "" } else { "s" }
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            config_path: PathBuf::from("indigen.toml"),
            indicator_count: 1,
            errors: vec![],
            warnings: vec![],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec!["✓ indigen.toml is valid (1 indicator)"]);
    }

    #[test]
    fn test_render_errors() {
        let report = CheckReport {
            config_path: PathBuf::from("indigen.toml"),
            indicator_count: 2,
            errors: vec!["indicator 'sma' is defined more than once".to_string()],
            warnings: vec![],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert!(!report.is_valid());
        assert_eq!(
            out.lines,
            vec!["error: indicator 'sma' is defined more than once".to_string(), String::new()]
        );
    }
}
