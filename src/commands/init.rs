use crate::areas::metadata::Metadata;
use crate::areas::repository::Repository;
use crate::artifacts::errors::WitError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create the `.wit` control directory, the staging and snapshot roots,
    /// and the initial metadata record.
    ///
    /// Fails with [`WitError::AlreadyInitialized`] before touching the
    /// filesystem if a repository already exists here.
    pub fn init(&self) -> anyhow::Result<()> {
        if self.wit_path().exists() {
            anyhow::bail!(WitError::AlreadyInitialized);
        }

        fs::create_dir(self.wit_path()).context("failed to create the .wit directory")?;

        fs::create_dir_all(self.staging().path())
            .context("failed to create the .wit/staging directory")?;

        fs::create_dir_all(self.images().path())
            .context("failed to create the .wit/images directory")?;

        fs::create_dir_all(self.images().manifests_path())
            .context("failed to create the .wit/manifests directory")?;

        self.metadata()
            .write(&Metadata::default())
            .context("failed to write the initial metadata record")?;

        writeln!(
            self.writer(),
            "Initialized empty wit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
