//! Bake operation - code generation from manifest.

use std::path::Path;

use eyre::{Context, Result};
use indigen_codegen::{Dialect, Generator, Git, NoVcs, StubPlan, VersionControl};
use indigen_manifest::Manifest;

use crate::reports::{
    BakeReport, GenerationResult, PreviewFile, PreviewResult, StubPreview, WrittenResult,
};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Output directory for generated code.
    pub output_dir: &'a Path,
    /// Dialect of new and amended stubs.
    pub dialect: Dialect,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to stage stubs with git.
    pub stage: bool,
}

/// Execute the bake operation.
pub fn bake(manifest: &Manifest, opts: BakeOptions) -> Result<BakeReport> {
    let generator = Generator::new(manifest, opts.dialect)?;
    let build = generator.build_info();

    let result = if opts.dry_run {
        let preview = generator
            .preview(opts.output_dir, &build)
            .wrap_err("Failed to plan stubs")?;

        GenerationResult::Preview(PreviewResult {
            files: preview
                .files
                .into_iter()
                .map(|f| PreviewFile {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
            stubs: preview
                .stubs
                .into_iter()
                .map(|(indicator, plan)| StubPreview {
                    indicator,
                    action: describe(&plan),
                })
                .collect(),
        })
    } else {
        let vcs: &dyn VersionControl = if opts.stage { &Git } else { &NoVcs };
        let generated = generator
            .generate(opts.output_dir, &build, vcs)
            .wrap_err("Failed to generate code")?;

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            header: generated.header,
            index: generated.index,
            stubs: generated.stubs,
        })
    };

    Ok(BakeReport {
        version: build.version,
        build: build.build,
        dialect: opts.dialect,
        indicator_count: generator.catalog().len(),
        warnings: super::check::lint(manifest),
        result,
    })
}

/// One-line description of a stub plan.
fn describe(plan: &StubPlan) -> String {
    match plan {
        StubPlan::Create { path, .. } => format!("create {}", path.display()),
        StubPlan::Append {
            path,
            rename_from: Some(from),
            blocks,
            ..
        } => format!(
            "rename {} -> {}, append {}",
            from.display(),
            path.display(),
            blocks
        ),
        StubPlan::Append {
            path,
            rename_from: None,
            blocks,
            ..
        } => format!("append {} to {}", blocks, path.display()),
        StubPlan::Unchanged { path } => format!("keep {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use indigen_codegen::{
        StubChange,
        testing::{SAMPLE_MANIFEST, manifest},
    };

    use super::*;

    fn options(dir: &Path, dry_run: bool) -> BakeOptions<'_> {
        BakeOptions {
            output_dir: dir,
            dialect: Dialect::Legacy,
            dry_run,
            stage: false,
        }
    }

    #[test]
    fn test_dry_run_plans_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let report = bake(&manifest(SAMPLE_MANIFEST), options(tmp.path(), true)).unwrap();

        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 2);
        assert_eq!(preview.stubs[0].indicator, "sma");
        assert!(preview.stubs[0].action.starts_with("create "));
        assert!(preview.stubs[0].action.ends_with("sma.c"));
        assert!(!tmp.path().join("indicators.h").exists());
    }

    #[test]
    fn test_bake_writes_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let report = bake(&manifest(SAMPLE_MANIFEST), options(tmp.path(), false)).unwrap();

        assert_eq!(report.indicator_count, 3);
        assert_eq!(report.failed_count(), 0);
        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written files");
        };
        assert!(written.header.is_file());
        assert!(written.index.is_file());
        assert!(
            written
                .stubs
                .iter()
                .all(|s| matches!(s.change, StubChange::Created { .. }))
        );
        assert!(tmp.path().join("indicators/ema.c").is_file());
    }

    #[test]
    fn test_describe() {
        let plan = StubPlan::Unchanged {
            path: "indicators/sma.c".into(),
        };
        assert_eq!(describe(&plan), "keep indicators/sma.c");
    }
}
