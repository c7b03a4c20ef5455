use crate::areas::images::CommitManifest;
use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use chrono::Utc;
use std::io::Write;

/// Result of a commit attempt.
///
/// An empty staging area is a sentinel outcome, not an error: nothing is
/// recorded and `last_commit` is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(CommitId),
    NothingToCommit,
}

impl Repository {
    /// Record an immutable snapshot of the staging area.
    ///
    /// Generates a fresh non-colliding id, copies the staging subtree
    /// verbatim into `.wit/images/<id>/`, persists the message in a
    /// per-commit manifest and repoints `last_commit`. The staging area is
    /// left untouched: it keeps mirroring the just-committed state until the
    /// next `add`.
    pub fn commit(&self, message: &str) -> anyhow::Result<CommitOutcome> {
        self.ensure_initialized()?;

        if self.staging().is_empty() {
            writeln!(self.writer(), "nothing to commit")?;
            return Ok(CommitOutcome::NothingToCommit);
        }

        let commit_id = CommitId::generate(|candidate| self.images().contains(candidate));

        self.images().capture(&commit_id, self.staging().path())?;

        let manifest = CommitManifest::new(message.trim().to_string(), Utc::now());
        self.images().write_manifest(&commit_id, &manifest)?;

        self.metadata().set_last_commit(commit_id.clone())?;

        writeln!(self.writer(), "[{}] {}", commit_id, manifest.message)?;

        Ok(CommitOutcome::Committed(commit_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repository_in(dir: &assert_fs::TempDir) -> Repository {
        Repository::new(dir.path(), Box::new(std::io::sink())).unwrap()
    }

    #[test]
    fn empty_staging_yields_the_sentinel_outcome() {
        let dir = assert_fs::TempDir::new().unwrap();
        let repository = repository_in(&dir);
        repository.init().unwrap();

        let outcome = repository.commit("message").unwrap();

        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        assert_eq!(repository.metadata().read().unwrap().last_commit, None);
    }

    #[test]
    fn committing_a_staged_file_returns_a_fresh_id() {
        let dir = assert_fs::TempDir::new().unwrap();
        let repository = repository_in(&dir);
        repository.init().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        repository.add(&["a.txt".to_string()]).unwrap();

        let CommitOutcome::Committed(first) = repository.commit("one").unwrap() else {
            panic!("expected a recorded commit");
        };
        // staging still mirrors the commit, so a second commit records again
        let CommitOutcome::Committed(second) = repository.commit("two").unwrap() else {
            panic!("expected a recorded commit");
        };

        assert_ne!(first, second);
        assert_eq!(
            repository.metadata().read().unwrap().last_commit,
            Some(second)
        );
    }
}
