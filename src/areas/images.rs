//! Snapshot store
//!
//! Commits live under `.wit/images/<commit-id>/` as verbatim copies of the
//! staging subtree at commit time. The store is append-only: snapshots are
//! never mutated or deleted. Alongside the image, a small manifest at
//! `.wit/manifests/<commit-id>.json` records the commit message and
//! timestamp without touching the snapshot's file-content layout.

use crate::artifacts::commit_id::CommitId;
use anyhow::Context;
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Per-commit manifest, informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CommitManifest {
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Images {
    path: PathBuf,
    manifests_path: PathBuf,
}

impl Images {
    pub fn new(path: PathBuf, manifests_path: PathBuf) -> Self {
        Images {
            path,
            manifests_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifests_path(&self) -> &Path {
        &self.manifests_path
    }

    fn image_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(commit_id.as_ref())
    }

    /// Whether a snapshot with this id exists.
    ///
    /// Ids carrying path separators or parent components never resolve, so a
    /// hostile id cannot address anything outside the store.
    pub fn contains(&self, commit_id: &CommitId) -> bool {
        let raw = commit_id.as_ref();
        if raw.is_empty() || raw.contains(['/', '\\']) || raw.contains("..") {
            return false;
        }

        self.image_path(commit_id).is_dir()
    }

    /// Copy the staging subtree verbatim into a new snapshot.
    pub fn capture(&self, commit_id: &CommitId, staging_root: &Path) -> anyhow::Result<()> {
        let image_root = self.image_path(commit_id);

        for entry in WalkDir::new(staging_root) {
            let entry = entry.context("failed to walk the staging area")?;
            let relative = entry
                .path()
                .strip_prefix(staging_root)
                .context("staged entry outside the staging root")?;
            let destination = image_root.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&destination)
                    .with_context(|| format!("failed to create {:?}", destination))?;
            } else if entry.file_type().is_file() {
                std::fs::copy(entry.path(), &destination)
                    .with_context(|| format!("failed to snapshot {:?}", relative))?;
            }
        }

        Ok(())
    }

    pub fn tracks(&self, commit_id: &CommitId, relative_path: &Path) -> bool {
        self.image_path(commit_id).join(relative_path).is_file()
    }

    pub fn read(&self, commit_id: &CommitId, relative_path: &Path) -> anyhow::Result<Vec<u8>> {
        let entry = self.image_path(commit_id).join(relative_path);

        std::fs::read(&entry).with_context(|| {
            format!("failed to read {:?} from snapshot {}", relative_path, commit_id)
        })
    }

    /// All file paths recorded in a snapshot, relative to its root, sorted.
    pub fn walk(&self, commit_id: &CommitId) -> anyhow::Result<BTreeSet<PathBuf>> {
        let image_root = self.image_path(commit_id);
        let mut entries = BTreeSet::new();

        for entry in WalkDir::new(&image_root) {
            let entry =
                entry.with_context(|| format!("failed to walk snapshot {}", commit_id))?;

            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&image_root)
                    .context("snapshot entry outside its root")?;
                entries.insert(relative.to_path_buf());
            }
        }

        Ok(entries)
    }

    /// The snapshot's top-level entries (files and directories), the unit of
    /// replacement during checkout.
    pub fn top_level_entries(&self, commit_id: &CommitId) -> anyhow::Result<Vec<PathBuf>> {
        let image_root = self.image_path(commit_id);
        let mut entries = std::fs::read_dir(&image_root)
            .with_context(|| format!("failed to list snapshot {}", commit_id))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect::<Vec<_>>();

        entries.sort();
        Ok(entries)
    }

    pub fn write_manifest(
        &self,
        commit_id: &CommitId,
        manifest: &CommitManifest,
    ) -> anyhow::Result<()> {
        let path = self.manifest_path(commit_id);
        let raw = serde_json::to_string_pretty(manifest)?;

        std::fs::write(&path, raw)
            .with_context(|| format!("failed to write manifest for {}", commit_id))?;

        Ok(())
    }

    /// Load a snapshot's manifest, if one was recorded.
    ///
    /// Repositories written before manifests existed simply have none; that
    /// is not an error.
    pub fn read_manifest(&self, commit_id: &CommitId) -> anyhow::Result<Option<CommitManifest>> {
        let path = self.manifest_path(commit_id);

        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read manifest for {}", commit_id))?;
        let manifest = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse manifest for {}", commit_id))?;

        Ok(Some(manifest))
    }

    fn manifest_path(&self, commit_id: &CommitId) -> PathBuf {
        self.manifests_path
            .join(format!("{}.json", commit_id.as_ref()))
    }
}
