use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use crate::artifacts::errors::WitError;
use std::io::Write;

impl Repository {
    /// Overwrite the working tree with the contents of a recorded snapshot
    /// and repoint `last_commit`.
    ///
    /// Every top-level snapshot entry replaces its working-tree counterpart
    /// wholesale. This is destructive and performs no confirmation of its
    /// own; a front end must obtain consent before calling it. Fails with
    /// [`WitError::CommitNotFound`] before any filesystem change when the
    /// snapshot does not exist.
    pub fn checkout(&self, commit_id: &CommitId) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.images().contains(commit_id) {
            anyhow::bail!(WitError::CommitNotFound(commit_id.to_string()));
        }

        for entry in self.images().top_level_entries(commit_id)? {
            self.workspace().replace_entry(&entry)?;
        }

        self.metadata().set_last_commit(commit_id.clone())?;

        match self.images().read_manifest(commit_id)? {
            Some(manifest) => writeln!(
                self.writer(),
                "Restored commit {} {}",
                commit_id,
                manifest.message
            )?,
            None => writeln!(self.writer(), "Restored commit {}", commit_id)?,
        }

        Ok(())
    }
}
