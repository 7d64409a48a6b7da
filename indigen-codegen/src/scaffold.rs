//! Incremental, append-only scaffolding of per-indicator stub files.
//!
//! Each indicator is handled on its own: the existing stub (if any) is read,
//! a [`StubPlan`] is computed without touching the disk, then applied. Bytes
//! already in a stub are never rewritten.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use indigen_core::{append_file, create_file};
use indigen_manifest::{Capabilities, Indicator};
use tracing::{debug, info, warn};

use crate::{
    Dialect,
    files::stub::{capability_blocks, characteristic_symbol, fresh_stub},
    vcs::VersionControl,
};

/// Directory holding stubs, relative to the output directory.
pub const STUB_DIR: &str = "indicators";

/// Resolves stub locations under the stub directory.
#[derive(Debug, Clone)]
pub struct StubPaths {
    dir: PathBuf,
}

impl StubPaths {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            dir: output_dir.join(STUB_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `name`'s stub in `dialect`.
    pub fn path(&self, name: &str, dialect: Dialect) -> PathBuf {
        self.dir.join(format!("{}.{}", name, dialect.extension()))
    }

    /// The existing stub for `name` under either extension.
    ///
    /// Legacy is checked first, so a stray pair resolves to the `.c` file.
    pub fn find(&self, name: &str) -> Option<(PathBuf, Dialect)> {
        Dialect::ALL
            .into_iter()
            .map(|d| (self.path(name, d), d))
            .find(|(path, _)| path.is_file())
    }

    /// Read the existing stub for `name`, if any.
    pub fn read(&self, name: &str) -> Result<Option<ExistingStub>> {
        let Some((path, dialect)) = self.find(name) else {
            return Ok(None);
        };
        let contents = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let sibling = Some(self.path(name, dialect.other())).filter(|p| p.is_file());
        Ok(Some(ExistingStub {
            path,
            dialect,
            contents,
            sibling,
        }))
    }
}

/// A stub found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingStub {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub contents: String,
    /// A second stub for the same indicator under the other extension.
    pub sibling: Option<PathBuf>,
}

/// Declared capabilities whose characteristic symbol is absent from `contents`.
pub fn missing_blocks(indicator: &Indicator, contents: &str) -> Capabilities {
    indicator
        .capabilities
        .iter()
        .filter(|&c| !contents.contains(&characteristic_symbol(&indicator.name, c)))
        .collect()
}

/// Separator placed between existing content and appended blocks so that
/// exactly one blank line divides them.
fn separator(contents: &str) -> &'static str {
    if contents.is_empty() {
        ""
    } else if contents.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    }
}

/// What a run will do to one stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubPlan {
    /// No stub exists: write full scaffolding.
    Create { path: PathBuf, content: String },
    /// Append missing blocks, optionally moving the file to the run's extension first.
    Append {
        path: PathBuf,
        rename_from: Option<PathBuf>,
        blocks: Capabilities,
        content: String,
    },
    /// Every declared block is present.
    Unchanged { path: PathBuf },
}

impl StubPlan {
    /// Where the stub lives once the plan is applied.
    pub fn path(&self) -> &Path {
        match self {
            StubPlan::Create { path, .. }
            | StubPlan::Append { path, .. }
            | StubPlan::Unchanged { path } => path,
        }
    }
}

/// Decide what to do with `indicator`'s stub. Pure.
pub fn plan(
    indicator: &Indicator,
    dialect: Dialect,
    paths: &StubPaths,
    existing: Option<&ExistingStub>,
) -> StubPlan {
    let target = paths.path(&indicator.name, dialect);

    let Some(existing) = existing else {
        return StubPlan::Create {
            path: target,
            content: fresh_stub(indicator, dialect),
        };
    };

    let blocks = missing_blocks(indicator, &existing.contents);
    if blocks.is_empty() {
        return StubPlan::Unchanged {
            path: existing.path.clone(),
        };
    }

    // A stub only changes extension when it is being edited anyway, and
    // never onto a file that is already there
    let (path, dialect, rename_from) = if existing.dialect == dialect || existing.sibling.is_some() {
        (existing.path.clone(), existing.dialect, None)
    } else {
        (target, dialect, Some(existing.path.clone()))
    };
    let content = format!(
        "{}{}",
        separator(&existing.contents),
        capability_blocks(indicator, blocks, dialect)
    );

    StubPlan::Append {
        path,
        rename_from,
        blocks,
        content,
    }
}

/// Outcome of one indicator's scaffolding step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubChange {
    Created {
        path: PathBuf,
    },
    Amended {
        path: PathBuf,
        renamed_from: Option<PathBuf>,
        added: Capabilities,
    },
    Unchanged {
        path: PathBuf,
    },
    /// Processing this indicator failed; other indicators were still handled.
    Failed {
        error: String,
    },
}

impl StubChange {
    pub fn is_failure(&self) -> bool {
        matches!(self, StubChange::Failed { .. })
    }
}

impl fmt::Display for StubChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StubChange::Created { path } => write!(f, "created {}", path.display()),
            StubChange::Amended {
                path,
                renamed_from: Some(from),
                added,
            } => write!(
                f,
                "renamed {} -> {}, added {}",
                from.display(),
                path.display(),
                added
            ),
            StubChange::Amended {
                path,
                renamed_from: None,
                added,
            } => write!(f, "added {} to {}", added, path.display()),
            StubChange::Unchanged { path } => write!(f, "up to date {}", path.display()),
            StubChange::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Per-indicator scaffolding result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubOutcome {
    pub indicator: String,
    pub change: StubChange,
}

/// Apply `plan` to disk, staging through `vcs`.
///
/// Staging failures are logged and do not fail the step.
pub fn apply(plan: &StubPlan, vcs: &dyn VersionControl) -> Result<StubChange> {
    match plan {
        StubPlan::Create { path, content } => {
            create_file(path, content)?;
            info!("created {}", path.display());
            if let Err(err) = vcs.intent_to_add(path) {
                warn!("could not stage {}: {err}", path.display());
            }
            Ok(StubChange::Created { path: path.clone() })
        }
        StubPlan::Append {
            path,
            rename_from,
            blocks,
            content,
        } => {
            if let Some(from) = rename_from {
                info!("renaming {} -> {}", from.display(), path.display());
                vcs.rename(from, path)?;
            }
            append_file(path, content)?;
            info!("added {} to {}", blocks, path.display());
            if let Err(err) = vcs.stage(path) {
                warn!("could not stage {}: {err}", path.display());
            }
            Ok(StubChange::Amended {
                path: path.clone(),
                renamed_from: rename_from.clone(),
                added: *blocks,
            })
        }
        StubPlan::Unchanged { path } => {
            debug!("{} is up to date", path.display());
            Ok(StubChange::Unchanged { path: path.clone() })
        }
    }
}

/// Writes stubs for a run in one dialect.
pub struct Scaffolder<'a> {
    paths: StubPaths,
    dialect: Dialect,
    vcs: &'a dyn VersionControl,
}

impl<'a> Scaffolder<'a> {
    pub fn new(output_dir: &Path, dialect: Dialect, vcs: &'a dyn VersionControl) -> Self {
        Self {
            paths: StubPaths::new(output_dir),
            dialect,
            vcs,
        }
    }

    /// Plan the stub for `indicator` from what is currently on disk.
    pub fn plan(&self, indicator: &Indicator) -> Result<StubPlan> {
        let existing = self.paths.read(&indicator.name)?;
        if let Some(sibling) = existing.as_ref().and_then(|e| e.sibling.as_ref()) {
            warn!(indicator = %indicator.name, "ignoring {}", sibling.display());
        }
        let plan = plan(indicator, self.dialect, &self.paths, existing.as_ref());
        debug!(indicator = %indicator.name, path = %plan.path().display(), "planned stub");
        Ok(plan)
    }

    /// Plan and apply one indicator.
    pub fn scaffold(&self, indicator: &Indicator) -> Result<StubChange> {
        let plan = self.plan(indicator)?;
        apply(&plan, self.vcs).wrap_err_with(|| format!("indicator '{}'", indicator.name))
    }

    /// Scaffold every indicator. A failure is recorded and the next
    /// indicator is still processed.
    pub fn scaffold_all<'i>(&self, indicators: impl IntoIterator<Item = &'i Indicator>) -> Vec<StubOutcome> {
        indicators
            .into_iter()
            .map(|indicator| {
                let change = self.scaffold(indicator).unwrap_or_else(|err| {
                    warn!("{err:#}");
                    StubChange::Failed {
                        error: format!("{err:#}"),
                    }
                });
                StubOutcome {
                    indicator: indicator.name.clone(),
                    change,
                }
            })
            .collect()
    }
}
