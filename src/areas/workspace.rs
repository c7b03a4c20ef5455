//! Working tree file system operations
//!
//! The workspace walks the live, user-owned directory tree and reads file
//! bytes. Every returned path is relative to the repository root; ignored
//! paths (including the `.wit` control directory) are filtered out here so
//! the rest of the engine never sees them.

use crate::artifacts::errors::WitError;
use crate::artifacts::ignore::IgnoreSet;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub fn new(path: PathBuf) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the files reachable from `start`, relative to the repository
    /// root, with ignored paths filtered out.
    ///
    /// `start` may name a single file or a directory to walk recursively;
    /// `None` walks the whole tree. Fails with [`WitError::PathNotFound`]
    /// when the given path does not exist and with
    /// [`WitError::PathOutsideRepository`] when it resolves to somewhere
    /// outside the repository root.
    pub fn list_files(
        &self,
        start: Option<&Path>,
        ignores: &IgnoreSet,
    ) -> anyhow::Result<BTreeSet<PathBuf>> {
        let start = match start {
            Some(p) => {
                let absolute = if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    self.path.join(p)
                };

                if !absolute.exists() {
                    anyhow::bail!(WitError::PathNotFound(p.to_path_buf()));
                }

                let resolved = absolute
                    .canonicalize()
                    .with_context(|| format!("failed to resolve {:?}", p))?;

                if !resolved.starts_with(&self.path) {
                    anyhow::bail!(WitError::PathOutsideRepository(p.to_path_buf()));
                }

                resolved
            }
            None => self.path.clone(),
        };

        let mut files = BTreeSet::new();

        if start.is_file() {
            if let Some(relative) = self.relativize(&start) {
                if !ignores.is_ignored(&relative) {
                    files.insert(relative);
                }
            }
            return Ok(files);
        }

        for entry in WalkDir::new(&start) {
            let entry = entry.context("failed to walk the working tree")?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(relative) = self.relativize(entry.path()) else {
                continue;
            };

            if !ignores.is_ignored(&relative) {
                files.insert(relative);
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, relative_path: &Path) -> anyhow::Result<Vec<u8>> {
        let absolute = self.path.join(relative_path);

        std::fs::read(&absolute)
            .with_context(|| format!("failed to read workspace file {:?}", relative_path))
    }

    /// Replace the working-tree entry of the same name as `source`,
    /// wholesale: an existing directory is destroyed and re-copied, an
    /// existing file is overwritten. Uncommitted changes at the target are
    /// lost; consent is the caller's concern.
    pub fn replace_entry(&self, source: &Path) -> anyhow::Result<()> {
        let name = source
            .file_name()
            .context("snapshot entry has no file name")?;
        let target = self.path.join(name);

        if source.is_dir() {
            if target.is_dir() {
                std::fs::remove_dir_all(&target)
                    .with_context(|| format!("failed to remove {:?}", target))?;
            } else if target.is_file() {
                std::fs::remove_file(&target)
                    .with_context(|| format!("failed to remove {:?}", target))?;
            }

            Self::copy_tree(source, &target)?;
        } else {
            if target.is_dir() {
                std::fs::remove_dir_all(&target)
                    .with_context(|| format!("failed to remove {:?}", target))?;
            }

            std::fs::copy(source, &target)
                .with_context(|| format!("failed to restore {:?}", target))?;
        }

        Ok(())
    }

    fn copy_tree(source: &Path, target: &Path) -> anyhow::Result<()> {
        for entry in WalkDir::new(source) {
            let entry = entry.context("failed to walk a snapshot entry")?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .context("snapshot entry outside its root")?;
            let destination = target.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&destination)
                    .with_context(|| format!("failed to create {:?}", destination))?;
            } else if entry.file_type().is_file() {
                std::fs::copy(entry.path(), &destination)
                    .with_context(|| format!("failed to restore {:?}", destination))?;
            }
        }

        Ok(())
    }

    fn relativize(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(&self.path).ok().map(Path::to_path_buf)
    }
}
