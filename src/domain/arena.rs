//! Arena-based family tree.
//!
//! All people live in one flat vector and refer to their children by index.
//! Multiple parents may link the same child, so the structure is a DAG
//! rather than a strict tree.

use std::collections::VecDeque;

use tracing::{instrument, warn};

use crate::domain::builder::SeedBuilder;
use crate::domain::codec;
use crate::domain::entities::{Individual, PersonId};
use crate::domain::error::{DomainError, DomainResult};

/// Owning collection of [`Individual`]s indexed by [`PersonId`].
///
/// Append-only: ids are positions in the arena, handed out sequentially
/// and never reassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyTree {
    people: Vec<Individual>,
}

impl FamilyTree {
    pub fn new() -> Self {
        Self { people: Vec::new() }
    }

    /// Tree populated with the built-in default lineage.
    pub fn with_default_seed() -> Self {
        let mut tree = Self::new();
        SeedBuilder::new().build(&mut tree);
        tree
    }

    /// Discard everyone and rebuild the default lineage.
    #[instrument(level = "debug", skip(self))]
    pub fn reset_to_default(&mut self) {
        self.people.clear();
        SeedBuilder::new().build(self);
    }

    /// Append a person and return the new id.
    #[instrument(level = "debug", skip(self))]
    pub fn add_person(&mut self, name: &str, birth_year: i32, death_year: Option<i32>) -> PersonId {
        self.people.push(Individual::new(name, birth_year, death_year));
        self.people.len() - 1
    }

    /// Link `child` under `parent` if both ids exist.
    ///
    /// Invalid ids are ignored (logged as a warning) and `false` is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn connect_parent_child(&mut self, parent: PersonId, child: PersonId) -> bool {
        match self.try_connect_parent_child(parent, child) {
            Ok(()) => true,
            Err(e) => {
                warn!("ignoring link {} -> {}: {}", parent, child, e);
                false
            }
        }
    }

    /// Link `child` under `parent`, failing if either id is out of range.
    pub fn try_connect_parent_child(&mut self, parent: PersonId, child: PersonId) -> DomainResult<()> {
        self.check_id(child)?;
        self.get_person_mut(parent)?.add_child(child);
        Ok(())
    }

    pub fn get_person(&self, id: PersonId) -> DomainResult<&Individual> {
        self.people.get(id).ok_or(DomainError::IdOutOfRange {
            id,
            size: self.people.len(),
        })
    }

    pub fn get_person_mut(&mut self, id: PersonId) -> DomainResult<&mut Individual> {
        let size = self.people.len();
        self.people
            .get_mut(id)
            .ok_or(DomainError::IdOutOfRange { id, size })
    }

    pub fn contains(&self, id: PersonId) -> bool {
        id < self.people.len()
    }

    fn check_id(&self, id: PersonId) -> DomainResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(DomainError::IdOutOfRange {
                id,
                size: self.people.len(),
            })
        }
    }

    pub fn size(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People with their ids, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Individual)> {
        self.people.iter().enumerate()
    }

    /// Ids that no one lists as a child.
    pub fn roots(&self) -> Vec<PersonId> {
        let mut has_parent = vec![false; self.people.len()];
        for person in &self.people {
            for &child in person.children() {
                if let Some(flag) = has_parent.get_mut(child) {
                    *flag = true;
                }
            }
        }
        has_parent
            .iter()
            .enumerate()
            .filter_map(|(id, linked)| (!linked).then_some(id))
            .collect()
    }

    /// Group everyone reachable from `root` by breadth-first distance.
    ///
    /// Layer 0 holds `root`. Each id lands in exactly one layer, the first one
    /// it is discovered in. Returns no layers when `root` is out of range.
    #[instrument(level = "debug", skip(self))]
    pub fn generations(&self, root: PersonId) -> Vec<Vec<PersonId>> {
        let mut layers: Vec<Vec<PersonId>> = Vec::new();
        if !self.contains(root) {
            return layers;
        }

        let mut visited = vec![false; self.people.len()];
        let mut queue = VecDeque::new();
        visited[root] = true;
        queue.push_back((root, 0usize));

        while let Some((current, depth)) = queue.pop_front() {
            if depth == layers.len() {
                layers.push(Vec::new());
            }
            layers[depth].push(current);

            for &child in self.people[current].children() {
                if let Some(seen) = visited.get_mut(child) {
                    if !*seen {
                        *seen = true;
                        queue.push_back((child, depth + 1));
                    }
                }
            }
        }

        layers
    }

    /// Parse the text file format into a new tree.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let people = codec::decode(input)?;
        Ok(Self { people })
    }

    /// Replace the contents with `input`, leaving the tree untouched on error.
    #[instrument(level = "debug", skip(self, input))]
    pub fn load_from_str(&mut self, input: &str) -> DomainResult<()> {
        *self = Self::parse(input)?;
        Ok(())
    }

    /// Serialize into the text file format.
    pub fn to_file_format(&self) -> String {
        codec::encode(&self.people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> FamilyTree {
        let mut tree = FamilyTree::new();
        let a = tree.add_person("A", 1900, None);
        let b = tree.add_person("B", 1930, None);
        let c = tree.add_person("C", 1960, None);
        tree.connect_parent_child(a, b);
        tree.connect_parent_child(b, c);
        tree
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut tree = FamilyTree::new();
        assert_eq!(tree.add_person("a", 1, None), 0);
        assert_eq!(tree.add_person("b", 2, Some(3)), 1);
        assert_eq!(tree.add_person("c", 4, None), 2);
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn invalid_link_is_a_noop() {
        let mut tree = chain();
        let before = tree.clone();
        assert!(!tree.connect_parent_child(0, 3));
        assert!(!tree.connect_parent_child(7, 0));
        assert_eq!(tree, before);
    }

    #[test]
    fn strict_link_reports_offending_id() {
        let mut tree = chain();
        let err = tree.try_connect_parent_child(0, 9).unwrap_err();
        assert_eq!(err, DomainError::IdOutOfRange { id: 9, size: 3 });
    }

    #[test]
    fn generations_of_chain() {
        assert_eq!(chain().generations(0), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn generations_out_of_range_root_is_empty() {
        assert!(chain().generations(3).is_empty());
        assert!(FamilyTree::new().generations(0).is_empty());
    }

    #[test]
    fn roots_lists_unlinked_people() {
        let mut tree = chain();
        tree.add_person("D", 1901, None);
        tree.connect_parent_child(3, 1);
        assert_eq!(tree.roots(), vec![0, 3]);
    }
}
