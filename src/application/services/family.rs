//! Family tree session service
//!
//! Owns the tree for one run together with the store it is committed to.

use tracing::{info, instrument, warn};

use crate::application::services::store::TreeStore;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{FamilyTree, PersonId};

/// How the session tree was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Read from the data file
    Loaded,
    /// Built from the default seed because loading failed
    Seeded { reason: String },
}

/// Service for editing and committing the session's family tree.
pub struct FamilyService {
    tree: FamilyTree,
    store: TreeStore,
}

impl FamilyService {
    /// Load the tree from `store`, or fall back to the default seed.
    ///
    /// A failed load never leaves a partially read tree behind.
    #[instrument(level = "debug", skip_all)]
    pub fn open(store: TreeStore) -> (Self, InitOutcome) {
        match store.load() {
            Ok(tree) => {
                info!("loaded family tree from {}", store.path().display());
                (Self { tree, store }, InitOutcome::Loaded)
            }
            Err(e) => {
                warn!("could not load family tree: {}", e);
                let tree = FamilyTree::with_default_seed();
                let outcome = InitOutcome::Seeded {
                    reason: e.to_string(),
                };
                (Self { tree, store }, outcome)
            }
        }
    }

    /// Load the tree for an immediate edit.
    ///
    /// Only a missing data file falls back to the seed. An unreadable file is
    /// an error, so saving can never replace it.
    #[instrument(level = "debug", skip_all)]
    pub fn open_for_update(store: TreeStore) -> ApplicationResult<Self> {
        match store.load() {
            Ok(tree) => Ok(Self { tree, store }),
            Err(ApplicationError::NoSavedTree(path)) => {
                info!("no data file at {}, starting from default data", path.display());
                Ok(Self {
                    tree: FamilyTree::with_default_seed(),
                    store,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Service over an already built tree.
    pub fn with_tree(tree: FamilyTree, store: TreeStore) -> Self {
        Self { tree, store }
    }

    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut FamilyTree {
        &mut self.tree
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Add a person as a child of `parent`.
    ///
    /// The parent is checked first so a bad id adds nobody.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(
        &mut self,
        parent: PersonId,
        name: &str,
        birth_year: i32,
        death_year: Option<i32>,
    ) -> ApplicationResult<PersonId> {
        self.add_person(name, birth_year, death_year, &[parent])
    }

    /// Add a person linked under every id in `parents`.
    ///
    /// All parents are checked first so a bad id adds nobody.
    #[instrument(level = "debug", skip(self))]
    pub fn add_person(
        &mut self,
        name: &str,
        birth_year: i32,
        death_year: Option<i32>,
        parents: &[PersonId],
    ) -> ApplicationResult<PersonId> {
        for &parent in parents {
            self.tree.get_person(parent)?;
        }
        let id = self.tree.add_person(name, birth_year, death_year);
        for &parent in parents {
            self.tree.try_connect_parent_child(parent, id)?;
        }
        Ok(id)
    }

    /// Strictly link two existing people.
    pub fn link(&mut self, parent: PersonId, child: PersonId) -> ApplicationResult<()> {
        self.tree.try_connect_parent_child(parent, child)?;
        Ok(())
    }

    /// Commit the tree to the store.
    pub fn save(&self) -> ApplicationResult<()> {
        self.store.save(&self.tree)
    }

    /// Discard all changes and rebuild the default seed (not saved).
    pub fn reset_to_default(&mut self) {
        self.tree.reset_to_default();
        info!("restored default family tree");
    }
}
