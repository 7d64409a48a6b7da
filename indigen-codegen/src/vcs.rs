//! Version-control staging for stub files.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Result, WrapErr, bail, eyre};
use tracing::{debug, warn};

/// Staging hooks invoked by the scaffolding writer.
pub trait VersionControl {
    /// Record that a freshly created file will be added (`git add -N`).
    fn intent_to_add(&self, path: &Path) -> Result<()>;

    /// Stage the current contents of a modified file.
    fn stage(&self, path: &Path) -> Result<()>;

    /// Move `from` to `to`, keeping history where the backend supports it.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}

/// Plain file-system renames, no staging.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVcs;

impl VersionControl for NoVcs {
    fn intent_to_add(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn stage(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs_rename(from, to)
    }
}

/// Shells out to `git`, running each command in the directory of the file
/// it touches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

impl Git {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<()> {
        debug!(dir = %dir.display(), "git {}", args.join(" "));

        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .wrap_err("failed to run git")?;

        if output.status.success() {
            Ok(())
        } else {
            Err(eyre!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
    }
}

/// Split a path into the directory to run in and the file name to pass.
fn split(path: &Path) -> Result<(PathBuf, String)> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| eyre!("not a file path: {}", path.display()))?;
    Ok((dir, file.to_string()))
}

impl VersionControl for Git {
    fn intent_to_add(&self, path: &Path) -> Result<()> {
        let (dir, file) = split(path)?;
        self.run(&dir, &["add", "-N", "--", &file])
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let (dir, file) = split(path)?;
        self.run(&dir, &["add", "--", &file])
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let (dir, from_file) = split(from)?;
        let (_, to_file) = split(to)?;

        match self.run(&dir, &["mv", "--", &from_file, &to_file]) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("{err}; falling back to a plain rename");
                fs_rename(from, to)
            }
        }
    }
}

/// Rename that refuses to replace an existing file.
fn fs_rename(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        bail!("refusing to rename {} over existing {}", from.display(), to.display());
    }
    std::fs::rename(from, to)
        .wrap_err_with(|| format!("failed to rename {} to {}", from.display(), to.display()))
}
