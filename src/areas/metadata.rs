//! Repository metadata record
//!
//! A single JSON document at `.wit/metadata.json` holding the last commit
//! pointer and the on-disk schema version:
//!
//! ```json
//! { "last_commit": "abc12345", "version": "1.0" }
//! ```
//!
//! Reads and writes are plain, non-atomic filesystem operations; the
//! engine-wide single-process assumption covers the read-modify-write cycle.

use crate::artifacts::commit_id::CommitId;
use crate::artifacts::errors::WitError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: &str = "1.0";

/// The persisted metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub last_commit: Option<CommitId>,
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            last_commit: None,
            version: SCHEMA_VERSION.to_string(),
        }
    }
}

/// Loads and persists the metadata record.
#[derive(Debug)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(path: PathBuf) -> Self {
        MetadataStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record from disk.
    ///
    /// An unreadable or unparsable record surfaces as
    /// [`WitError::CorruptMetadata`]; no repair is attempted.
    pub fn read(&self) -> anyhow::Result<Metadata> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| WitError::CorruptMetadata(e.to_string()))?;

        let metadata = serde_json::from_str::<Metadata>(&raw)
            .map_err(|e| WitError::CorruptMetadata(e.to_string()))?;

        Ok(metadata)
    }

    pub fn write(&self, metadata: &Metadata) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(metadata)?;

        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write metadata to {:?}", self.path))?;

        Ok(())
    }

    /// Read-modify-write helper for repointing `last_commit`.
    pub fn set_last_commit(&self, commit_id: CommitId) -> anyhow::Result<()> {
        let mut metadata = self.read()?;
        metadata.last_commit = Some(commit_id);
        self.write(&metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &assert_fs::TempDir) -> MetadataStore {
        MetadataStore::new(dir.path().join("metadata.json"))
    }

    #[test]
    fn round_trips_the_default_record() {
        let dir = assert_fs::TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(&Metadata::default()).unwrap();
        let loaded = store.read().unwrap();

        assert_eq!(loaded, Metadata::default());
        assert_eq!(loaded.version, SCHEMA_VERSION);
    }

    #[test]
    fn persists_the_documented_shape() {
        let dir = assert_fs::TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(&Metadata::default()).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["last_commit"], serde_json::Value::Null);
        assert_eq!(value["version"], "1.0");
    }

    #[test]
    fn set_last_commit_repoints_the_record() {
        let dir = assert_fs::TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write(&Metadata::default()).unwrap();

        store
            .set_last_commit(CommitId::from_raw("deadbeef"))
            .unwrap();

        let loaded = store.read().unwrap();
        assert_eq!(loaded.last_commit, Some(CommitId::from_raw("deadbeef")));
    }

    #[test]
    fn garbage_record_is_reported_as_corrupt() {
        let dir = assert_fs::TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        let err = store.read().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WitError>(),
            Some(WitError::CorruptMetadata(_))
        ));
    }
}
