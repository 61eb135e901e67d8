//! Durable storage of a family tree in its text file format.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::FamilyTree;
use crate::infrastructure::traits::FileSystem;

/// Reads and writes one data file.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl TreeStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Read and parse the data file.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> ApplicationResult<FamilyTree> {
        if !self.exists() {
            return Err(ApplicationError::NoSavedTree(self.path.clone()));
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read family tree", &self.path)?;
        let tree = FamilyTree::parse(&content).map_err(|source| ApplicationError::Load {
            path: self.path.clone(),
            source,
        })?;
        debug!("loaded {} people", tree.size());
        Ok(tree)
    }

    /// Write the tree to a sibling temp file, then rename it into place.
    #[instrument(level = "debug", skip(self, tree), fields(path = %self.path.display()))]
    pub fn save(&self, tree: &FamilyTree) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create parent directory", &self.path)?;

        let tmp = self.temp_path();
        self.fs
            .write(&tmp, &tree.to_file_format())
            .with_path_context("write family tree", &tmp)?;
        let renamed = self.fs.rename(&tmp, &self.path);
        if renamed.is_err() {
            let _ = self.fs.remove_file(&tmp);
        }
        renamed.with_path_context("replace family tree", &self.path)?;
        debug!("saved {} people", tree.size());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
