//! Snapshot identifier
//!
//! Commit ids are opaque 8-character hexadecimal strings. They carry no
//! ordering or content information; uniqueness within a repository is
//! guaranteed by regenerating on collision against the snapshot store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

pub const COMMIT_ID_LENGTH: usize = 8;

/// Opaque identifier of a recorded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Generate a fresh id that does not collide with any existing snapshot.
    ///
    /// The candidate is derived from a SHA-1 over the current timestamp, the
    /// process id and a retry counter; `exists` is consulted until an unused
    /// id comes out.
    pub fn generate<F>(mut exists: F) -> Self
    where
        F: FnMut(&CommitId) -> bool,
    {
        let mut attempt: u32 = 0;

        loop {
            let mut hasher = Sha1::new();
            hasher.update(
                Utc::now()
                    .timestamp_nanos_opt()
                    .unwrap_or_default()
                    .to_be_bytes(),
            );
            hasher.update(std::process::id().to_be_bytes());
            hasher.update(attempt.to_be_bytes());

            let digest = hasher.finalize();
            let id = CommitId(
                digest
                    .iter()
                    .take(COMMIT_ID_LENGTH / 2)
                    .map(|byte| format!("{:02x}", byte))
                    .collect(),
            );

            if !exists(&id) {
                return id;
            }

            attempt += 1;
        }
    }

    /// Wrap a caller-supplied id without validating that it names a snapshot.
    ///
    /// Ids containing path separators or parent-directory components are the
    /// lookup's concern; see [`Images::contains`](crate::areas::images::Images).
    pub fn from_raw(id: impl Into<String>) -> Self {
        CommitId(id.into())
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_is_short_hex() {
        let id = CommitId::generate(|_| false);

        assert_eq!(id.as_ref().len(), COMMIT_ID_LENGTH);
        assert!(id.as_ref().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generation_retries_until_id_is_unused() {
        let mut rejections = 0;
        let id = CommitId::generate(|_| {
            rejections += 1;
            rejections <= 3
        });

        assert_eq!(rejections, 4);
        assert_eq!(id.as_ref().len(), COMMIT_ID_LENGTH);
    }

    #[test]
    fn consecutive_ids_differ() {
        let first = CommitId::generate(|_| false);
        let second = CommitId::generate(|candidate| candidate == &first);

        assert_ne!(first, second);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = CommitId::from_raw("deadbeef");

        assert_eq!(serde_json::to_string(&id).unwrap(), "\"deadbeef\"");
    }
}
