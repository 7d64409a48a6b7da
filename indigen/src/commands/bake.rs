use std::path::PathBuf;

use clap::Args;
use eyre::{Result, bail};
use indigen_codegen::Dialect;
use indigen_manifest::Manifest;
use tracing::debug;

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to indigen.toml (defaults to ./indigen.toml)
    #[arg(short, long, default_value = "indigen.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Write new stubs as legacy C (`.c`) instead of C++ (`.cc`)
    #[arg(long)]
    pub legacy: bool,

    /// Preview generated code and stub changes without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Do not stage stubs with git; renames become plain file renames
    #[arg(long)]
    pub no_stage: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        debug!(
            config = %self.config.display(),
            indicators = manifest.indicators.len(),
            "loaded manifest"
        );

        let report = ops::bake(
            &manifest,
            BakeOptions {
                output_dir: &self.output,
                dialect: Dialect::from_legacy_flag(self.legacy),
                dry_run: self.dry_run,
                stage: !self.no_stage,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        let failed = report.failed_count();
        if failed > 0 {
            bail!("{} indicator stub(s) could not be updated", failed);
        }
        Ok(())
    }
}
