use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Copy the given files, or every file under the given directories, into
    /// the staging area at their relative paths.
    ///
    /// Ignored candidates are silently skipped, including paths named
    /// explicitly. Re-adding overwrites the staged bytes: last add wins.
    /// Never touches the snapshot store.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut staged_count = 0usize;

        for path in paths {
            let candidates = self
                .workspace()
                .list_files(Some(Path::new(path)), self.ignores())?;

            for relative_path in candidates {
                let source = self.path().join(&relative_path);
                self.staging().stage(&relative_path, &source)?;
                staged_count += 1;
            }
        }

        writeln!(
            self.writer(),
            "staged {} file{}",
            staged_count,
            if staged_count == 1 { "" } else { "s" }
        )?;

        Ok(())
    }
}
