use crate::areas::repository::Repository;
use crate::artifacts::commit_id::CommitId;
use crate::artifacts::status::StatusReport;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

// Classification rules:
// - untracked: in the working tree, absent from staging and the last commit
// - not staged: staged, but the working tree holds different bytes
// - to be committed: staged, and absent from or different in the last commit
//
// A staged path deleted from the working tree is deliberately not reported;
// the comparison only runs for paths found while walking the working tree.
impl Repository {
    /// Classify every relevant path across working tree, staging area and
    /// latest snapshot. Pure computation; rendering lives in
    /// [`print_status`](Repository::print_status).
    pub fn status(&self) -> anyhow::Result<StatusReport> {
        self.ensure_initialized()?;

        let last_commit = self.metadata().read()?.last_commit;

        let mut untracked = BTreeSet::new();
        let mut not_staged = BTreeSet::new();

        for path in self.workspace().list_files(None, self.ignores())? {
            if !self.staging().contains(&path) {
                if !self.is_in_last_commit(&last_commit, &path) {
                    untracked.insert(path);
                }
            } else if self.workspace().read_file(&path)? != self.staging().read(&path)? {
                // whole-file byte comparison, never metadata-based
                not_staged.insert(path);
            }
        }

        let mut to_be_committed = BTreeSet::new();

        for path in self.staging().walk()? {
            let recorded = match &last_commit {
                Some(id) if self.images().tracks(id, &path) => {
                    self.images().read(id, &path)? == self.staging().read(&path)?
                }
                _ => false,
            };

            if !recorded {
                to_be_committed.insert(path);
            }
        }

        Ok(StatusReport::new(
            last_commit,
            untracked.into_iter().collect(),
            not_staged.into_iter().collect(),
            to_be_committed.into_iter().collect(),
        ))
    }

    /// Render a status report on the repository writer.
    pub fn print_status(&self) -> anyhow::Result<()> {
        let report = self.status()?;

        match &report.last_commit {
            Some(id) => writeln!(self.writer(), "Last commit: {}", id)?,
            None => writeln!(self.writer(), "No commits yet")?,
        }

        self.print_section(
            "Changes to be committed:",
            &report.to_be_committed,
            |line| line.green(),
        )?;
        self.print_section(
            "Changes not staged for commit:",
            &report.not_staged,
            |line| line.red(),
        )?;
        self.print_section("Untracked files:", &report.untracked, |line| line.red())?;

        if report.is_clean() {
            writeln!(self.writer(), "\nnothing to report, working tree clean")?;
        }

        Ok(())
    }

    fn is_in_last_commit(&self, last_commit: &Option<CommitId>, path: &Path) -> bool {
        last_commit
            .as_ref()
            .is_some_and(|id| self.images().tracks(id, path))
    }

    fn print_section(
        &self,
        header: &str,
        paths: &[PathBuf],
        paint: impl Fn(&str) -> colored::ColoredString,
    ) -> anyhow::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "\n{}", header)?;
        for path in paths {
            let line = path.display().to_string();
            writeln!(self.writer(), "\t{}", paint(&line))?;
        }

        Ok(())
    }
}
