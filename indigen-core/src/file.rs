use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};

/// Banner placed at the top of files that are regenerated on every run.
pub const GENERATED_HEADER: &str = "/* Generated by indigen. Do not edit. */";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content (without the header banner)
    fn render(&self) -> String;

    /// Render the file exactly as it is written to disk
    fn contents(&self) -> String {
        match self.rules().header {
            Some(header) => format!("{}\n{}", header, self.render()),
            None => self.render(),
        }
    }

    /// Write the file to disk, replacing any previous version
    fn write(&self, base: &Path) -> Result<PathBuf> {
        let path = self.path(base);
        write_file(&path, &self.contents())?;
        Ok(path)
    }
}

/// Write `content` to `path`, replacing whatever was there.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    create_parent(path)?;
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// Create a new file at `path`. Fails if the file already exists.
pub fn create_file(path: &Path, content: &str) -> Result<()> {
    create_parent(path)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// Append `content` to the end of an existing file. Existing bytes are never touched.
pub fn append_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open {} for appending", path.display()))?;
    file.write_all(content.as_bytes())
        .wrap_err_with(|| format!("failed to append to {}", path.display()))
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub header: Option<&'static str>,
}

impl FileRules {
    /// Rules for a fully generated artifact: the banner goes on top.
    pub fn generated() -> Self {
        Self {
            header: Some(GENERATED_HEADER),
        }
    }
}
