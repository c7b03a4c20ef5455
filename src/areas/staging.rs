//! Staging area
//!
//! A mirrored subtree under `.wit/staging`: `add` copies file bytes to the
//! same relative path inside it, last add wins. The mirror is deliberately
//! left untouched by `commit` — after a commit it keeps reflecting the
//! just-committed state until the next `add`.

use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Staging {
    path: PathBuf,
}

impl Staging {
    pub fn new(path: PathBuf) -> Self {
        Staging { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy `source`'s current bytes into the mirror at `relative_path`,
    /// creating intermediate directories and overwriting any previous entry.
    pub fn stage(&self, relative_path: &Path, source: &Path) -> anyhow::Result<()> {
        let destination = self.path.join(relative_path);

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create staging directory {:?}", parent))?;
        }

        std::fs::copy(source, &destination)
            .with_context(|| format!("failed to stage {:?}", relative_path))?;

        Ok(())
    }

    pub fn contains(&self, relative_path: &Path) -> bool {
        self.path.join(relative_path).is_file()
    }

    pub fn read(&self, relative_path: &Path) -> anyhow::Result<Vec<u8>> {
        let entry = self.path.join(relative_path);

        std::fs::read(&entry)
            .with_context(|| format!("failed to read staged entry {:?}", relative_path))
    }

    /// Whether no file has been staged yet.
    pub fn is_empty(&self) -> bool {
        !self.path.exists()
            || !WalkDir::new(&self.path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .any(|entry| entry.file_type().is_file())
    }

    /// All staged relative paths, sorted.
    pub fn walk(&self) -> anyhow::Result<BTreeSet<PathBuf>> {
        let mut entries = BTreeSet::new();

        if !self.path.exists() {
            return Ok(entries);
        }

        for entry in WalkDir::new(&self.path) {
            let entry = entry.context("failed to walk the staging area")?;

            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&self.path)
                    .context("staged entry outside the staging root")?;
                entries.insert(relative.to_path_buf());
            }
        }

        Ok(entries)
    }
}
