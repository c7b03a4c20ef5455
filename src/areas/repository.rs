use crate::areas::images::Images;
use crate::areas::metadata::MetadataStore;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::WitError;
use crate::artifacts::ignore::IgnoreSet;
use std::cell::RefCell;
use std::cell::RefMut;
use std::path::{Path, PathBuf};

pub const WIT_DIR: &str = ".wit";

/// Handle over one wit repository.
///
/// Explicitly constructed and passed to every operation; it owns the
/// repository root, the four areas and a writer for human-readable output.
/// The engine is single-process: nothing here locks the repository against
/// concurrent invocations.
pub struct Repository {
    path: PathBuf,
    writer: RefCell<Box<dyn std::io::Write>>,
    metadata: MetadataStore,
    staging: Staging,
    images: Images,
    workspace: Workspace,
    ignores: IgnoreSet,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let wit_path = path.join(WIT_DIR);

        let metadata = MetadataStore::new(wit_path.join("metadata.json"));
        let staging = Staging::new(wit_path.join("staging"));
        let images = Images::new(wit_path.join("images"), wit_path.join("manifests"));
        let workspace = Workspace::new(path.clone());
        let ignores = IgnoreSet::load(&path)?;

        Ok(Repository {
            path,
            writer: RefCell::new(writer),
            metadata,
            staging,
            images,
            workspace,
            ignores,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn wit_path(&self) -> PathBuf {
        self.path.join(WIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn images(&self) -> &Images {
        &self.images
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn ignores(&self) -> &IgnoreSet {
        &self.ignores
    }

    pub(crate) fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.wit_path().is_dir() {
            anyhow::bail!(WitError::NotInitialized);
        }

        Ok(())
    }
}
