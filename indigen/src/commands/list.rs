use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use indigen_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    /// Path to indigen.toml (defaults to ./indigen.toml)
    #[arg(short, long, default_value = "indigen.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let report = ops::list(&manifest)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
