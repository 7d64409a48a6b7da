//! Test utilities for the generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use eyre::Result;
use indigen_manifest::Manifest;

use crate::{Dialect, files::BuildInfo, scaffold::StubPaths, vcs::{NoVcs, VersionControl}};

/// Three indicators covering no capabilities, both capabilities, and no options.
pub const SAMPLE_MANIFEST: &str = r#"
[library]
version = "0.9.2"

[indicators.sma]
full_name = "Simple Moving Average"
category = "overlay"
inputs = ["real"]
options = ["period"]
outputs = ["sma"]

[indicators.ema]
full_name = "Exponential Moving Average"
category = "overlay"
inputs = ["real"]
options = ["period"]
outputs = ["ema"]
capabilities = ["ref", "stream"]

[indicators.abs]
full_name = "Vector Absolute Value"
category = "simple"
inputs = ["real"]
outputs = ["abs"]
"#;

/// A fixed build stamp so that runs compare byte-for-byte.
pub fn fixed_build() -> BuildInfo {
    BuildInfo::new("0.9.2", 1_700_000_000)
}

/// Parse a manifest, panicking with the diagnostic on failure.
pub fn manifest(src: &str) -> Manifest {
    match Manifest::from_str_with_filename(src, "indigen.toml") {
        Ok(m) => m,
        Err(e) => panic!("invalid test manifest: {}", e),
    }
}

/// Read the stub for `name` in `dialect`, or `None` if it does not exist.
pub fn read_stub(output_dir: &Path, name: &str, dialect: Dialect) -> Option<String> {
    std::fs::read_to_string(StubPaths::new(output_dir).path(name, dialect)).ok()
}

/// A staging call observed by [`RecordingVcs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    IntentToAdd(PathBuf),
    Stage(PathBuf),
    Rename(PathBuf, PathBuf),
}

/// Records staging calls and performs renames on the file system.
#[derive(Debug, Default)]
pub struct RecordingVcs {
    calls: RefCell<Vec<VcsCall>>,
}

impl RecordingVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }
}

impl VersionControl for RecordingVcs {
    fn intent_to_add(&self, path: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(VcsCall::IntentToAdd(path.to_path_buf()));
        Ok(())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Stage(path.to_path_buf()));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(VcsCall::Rename(from.to_path_buf(), to.to_path_buf()));
        NoVcs.rename(from, to)
    }
}

/// Assert that two strings are equal, reporting the differing lines on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }

    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let max_lines = expected_lines.len().max(actual_lines.len());

    let mut diff = String::new();
    for i in 0..max_lines {
        let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
        let act = actual_lines.get(i).copied().unwrap_or("<missing>");
        if exp != act {
            diff.push_str(&format!("Line {}:\n  expected: {}\n  actual:   {}\n", i + 1, exp, act));
        }
    }
    if diff.is_empty() {
        diff.push_str("(only trailing newlines differ)\n");
    }

    panic!("Content mismatch:\n{}", diff);
}
