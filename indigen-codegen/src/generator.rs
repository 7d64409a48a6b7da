//! Runs the three generators over one manifest.

use std::path::{Path, PathBuf};

use eyre::Result;
use indigen_core::GeneratedFile;
use indigen_manifest::Manifest;
use tracing::info;

use crate::{
    Dialect,
    catalog::Catalog,
    files::{BuildInfo, HEADER_FILE, INDEX_FILE, IndicatorsHeader, IndicatorsIndex, MetadataTable},
    scaffold::{Scaffolder, StubOutcome, StubPlan},
    vcs::VersionControl,
};

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// What a run would do, computed without writing anything.
#[derive(Debug)]
pub struct Preview {
    /// Header and index, fully rendered
    pub files: Vec<PreviewFile>,
    /// Stub plans in manifest order
    pub stubs: Vec<(String, StubPlan)>,
}

/// Result of code generation
#[derive(Debug)]
pub struct GenerateResult {
    pub header: PathBuf,
    pub index: PathBuf,
    /// One outcome per indicator, in manifest order
    pub stubs: Vec<StubOutcome>,
}

impl GenerateResult {
    pub fn failures(&self) -> impl Iterator<Item = &StubOutcome> {
        self.stubs.iter().filter(|s| s.change.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Generator for one manifest in one dialect.
pub struct Generator<'a> {
    manifest: &'a Manifest,
    catalog: Catalog<'a>,
    table: MetadataTable,
    dialect: Dialect,
}

impl<'a> Generator<'a> {
    /// Build both orderings. Fails on an empty or ambiguous indicator set.
    pub fn new(manifest: &'a Manifest, dialect: Dialect) -> Result<Self> {
        let catalog = Catalog::new(&manifest.indicators)?;
        let table = MetadataTable::new(&catalog);
        Ok(Self {
            manifest,
            catalog,
            table,
            dialect,
        })
    }

    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    pub fn table(&self) -> &MetadataTable {
        &self.table
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Build metadata for a run starting now.
    pub fn build_info(&self) -> BuildInfo {
        BuildInfo::now(self.manifest.library.version.to_string())
    }

    /// Preview generated files and stub plans without writing to disk.
    pub fn preview(&self, output_dir: &Path, build: &BuildInfo) -> Result<Preview> {
        let header = IndicatorsHeader::new(&self.catalog, build);
        let index = IndicatorsIndex::new(&self.table);
        let files = vec![
            PreviewFile {
                path: HEADER_FILE.to_string(),
                content: header.contents(),
            },
            PreviewFile {
                path: INDEX_FILE.to_string(),
                content: index.contents(),
            },
        ];

        // Planning only reads; the version-control backend is never called
        let scaffolder = Scaffolder::new(output_dir, self.dialect, &crate::vcs::NoVcs);
        let stubs = self
            .catalog
            .in_manifest_order()
            .map(|ind| Ok((ind.name.clone(), scaffolder.plan(ind)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Preview { files, stubs })
    }

    /// Generate all files into `output_dir`.
    ///
    /// The header and index are written first and any failure there aborts
    /// the run. Stub failures are collected per indicator.
    pub fn generate(
        &self,
        output_dir: &Path,
        build: &BuildInfo,
        vcs: &dyn VersionControl,
    ) -> Result<GenerateResult> {
        let header = IndicatorsHeader::new(&self.catalog, build).write(output_dir)?;
        info!("wrote {}", header.display());

        let index = IndicatorsIndex::new(&self.table).write(output_dir)?;
        info!("wrote {}", index.display());

        let scaffolder = Scaffolder::new(output_dir, self.dialect, vcs);
        let stubs = scaffolder.scaffold_all(self.catalog.in_manifest_order());

        Ok(GenerateResult {
            header,
            index,
            stubs,
        })
    }
}
