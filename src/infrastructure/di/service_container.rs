//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{FamilyService, InitOutcome, TreeStore};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application settings and I/O implementations.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Store for the configured data file.
    pub fn tree_store(&self) -> TreeStore {
        TreeStore::new(Arc::clone(&self.fs), self.settings.data_file.clone())
    }

    /// Open the session tree: load the data file or fall back to the seed.
    pub fn family_service(&self) -> (FamilyService, InitOutcome) {
        FamilyService::open(self.tree_store())
    }
}
