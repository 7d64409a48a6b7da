//! List command report data structures.

use super::output::{Output, Report};

/// One indicator, as listed.
#[derive(Debug)]
pub struct IndicatorEntry {
    /// Position in the metadata table.
    pub index: usize,
    /// Enumerated constant bound to `index`.
    pub constant: String,
    pub name: String,
    pub full_name: String,
    pub category: String,
    pub capabilities: String,
    /// Input, option and output counts.
    pub counts: (usize, usize, usize),
}

/// Indicators in index order.
#[derive(Debug)]
pub struct ListReport {
    pub version: String,
    pub entries: Vec<IndicatorEntry>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Library version", &self.version);
        out.newline();
        out.section(&format!("Indicators ({})", self.entries.len()));

        let width = self.entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in &self.entries {
            let (inputs, options, outputs) = entry.counts;
            out.list_item(&format!(
                "{:>3} {:<width$}  {} [{}] in:{} opt:{} out:{} caps: {} ({})",
                entry.index,
                entry.name,
                entry.full_name,
                entry.category,
                inputs,
                options,
                outputs,
                entry.capabilities,
                entry.constant,
                width = width
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render() {
        let report = ListReport {
            version: "0.9.2".to_string(),
            entries: vec![IndicatorEntry {
                index: 0,
                constant: "TI_INDICATOR_ABS_INDEX".to_string(),
                name: "abs".to_string(),
                full_name: "Vector Absolute Value".to_string(),
                category: "simple".to_string(),
                capabilities: "none".to_string(),
                counts: (1, 0, 1),
            }],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "Library version: 0.9.2");
        assert_eq!(out.lines[2], "Indicators (1):");
        assert_eq!(
            out.lines[3],
            "  -   0 abs  Vector Absolute Value [simple] in:1 opt:0 out:1 caps: none (TI_INDICATOR_ABS_INDEX)"
        );
    }
}
