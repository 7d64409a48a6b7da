//! Bake command report data structures.

use std::path::PathBuf;

use indigen_codegen::{Dialect, StubChange, StubOutcome};

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Library version stamped into the header.
    pub version: String,

    /// Build stamp stamped into the header.
    pub build: u64,

    /// Dialect of new and amended stubs.
    pub dialect: Dialect,

    /// Number of indicators.
    pub indicator_count: usize,

    /// Lint warnings.
    pub warnings: Vec<String>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    pub header: PathBuf,
    pub index: PathBuf,
    /// Per-indicator stub outcomes, in manifest order.
    pub stubs: Vec<StubOutcome>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
    /// What would happen to each stub.
    pub stubs: Vec<StubPreview>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

/// A planned stub change in preview mode.
#[derive(Debug)]
pub struct StubPreview {
    pub indicator: String,
    pub action: String,
}

impl BakeReport {
    /// Number of indicators whose stub could not be updated.
    pub fn failed_count(&self) -> usize {
        match &self.result {
            GenerationResult::Written(written) => {
                written.stubs.iter().filter(|s| s.change.is_failure()).count()
            }
            GenerationResult::Preview(_) => 0,
        }
    }
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl BakeReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.preformatted(&format!("indicators v{} (build {})", self.version, self.build));
        out.newline();

        out.key_value("Output", &written.output_dir.display().to_string());
        out.key_value("Dialect", &self.dialect.to_string());
        out.key_value("Indicators", &self.indicator_count.to_string());
        out.key_value("Generated", &written.header.display().to_string());
        out.key_value("Generated", &written.index.display().to_string());

        let created: Vec<_> = written
            .stubs
            .iter()
            .filter_map(|s| match &s.change {
                StubChange::Created { path } => Some(path.display().to_string()),
                _ => None,
            })
            .collect();
        if !created.is_empty() {
            out.newline();
            out.section("New stubs");
            for path in &created {
                out.added_item(path);
            }
        }

        let amended: Vec<_> = written
            .stubs
            .iter()
            .filter(|s| matches!(s.change, StubChange::Amended { .. }))
            .collect();
        if !amended.is_empty() {
            out.newline();
            out.section("Amended stubs");
            for stub in amended {
                out.changed_item(&stub.change.to_string());
            }
        }

        let failed: Vec<_> = written.stubs.iter().filter(|s| s.change.is_failure()).collect();
        if !failed.is_empty() {
            out.newline();
            for stub in failed {
                out.error(&format!("{}: {}", stub.indicator, stub.change));
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Stubs");
        for stub in &preview.stubs {
            out.list_item(&format!("{}: {}", stub.indicator, stub.action));
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be generated, {} stubs planned ({} dialect)",
            preview.files.len(),
            preview.stubs.len(),
            self.dialect
        ));
    }
}
