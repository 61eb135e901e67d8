//! Domain entities: core data structures

use std::fmt;

/// Index of a person in a [`FamilyTree`](crate::domain::FamilyTree).
///
/// Ids are assigned sequentially from 0 and never reused.
pub type PersonId = usize;

/// Death year marker for "living / unknown" in the file format and at prompts.
pub const LIVING_SENTINEL: i32 = -1;

/// One person record in the family tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    name: String,
    birth_year: i32,
    /// None while living or unknown; never `Some(LIVING_SENTINEL)`
    death_year: Option<i32>,
    /// Ids of children in insertion order; duplicates are kept
    children: Vec<PersonId>,
}

impl Individual {
    /// `Some(LIVING_SENTINEL)` is stored as living.
    pub fn new(name: impl Into<String>, birth_year: i32, death_year: Option<i32>) -> Self {
        Self {
            name: name.into(),
            birth_year,
            death_year: normalize_death_year(death_year),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_year
    }

    pub fn is_living(&self) -> bool {
        self.death_year.is_none()
    }

    pub fn children(&self) -> &[PersonId] {
        &self.children
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_birth_year(&mut self, birth_year: i32) {
        self.birth_year = birth_year;
    }

    /// `Some(LIVING_SENTINEL)` marks the person as living.
    pub fn set_death_year(&mut self, death_year: Option<i32>) {
        self.death_year = normalize_death_year(death_year);
    }

    /// Append a child id. Does not deduplicate.
    pub fn add_child(&mut self, child: PersonId) {
        self.children.push(child);
    }

    /// Death year as written to disk, `-1` when living.
    pub fn death_year_raw(&self) -> i32 {
        self.death_year.unwrap_or(LIVING_SENTINEL)
    }
}

fn normalize_death_year(death_year: Option<i32>) -> Option<i32> {
    death_year.and_then(death_year_from_raw)
}

/// Convert an on-disk death year into the in-memory representation.
pub fn death_year_from_raw(raw: i32) -> Option<i32> {
    (raw != LIVING_SENTINEL).then_some(raw)
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (b. {}", self.name, self.birth_year)?;
        if let Some(death) = self.death_year {
            write!(f, ", d. {}", death)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_death_year_only_when_recorded() {
        let victoria = Individual::new("Queen Victoria", 1819, Some(1901));
        let charles = Individual::new("King Charles III", 1948, None);

        assert_eq!(victoria.to_string(), "Queen Victoria (b. 1819, d. 1901)");
        assert_eq!(charles.to_string(), "King Charles III (b. 1948)");
    }

    #[test]
    fn add_child_keeps_duplicates_in_order() {
        let mut p = Individual::new("p", 1900, None);
        p.add_child(3);
        p.add_child(1);
        p.add_child(3);
        assert_eq!(p.children(), &[3, 1, 3]);
    }

    #[test]
    fn sentinel_maps_to_living() {
        assert_eq!(death_year_from_raw(-1), None);
        assert_eq!(death_year_from_raw(1952), Some(1952));
        assert_eq!(death_year_from_raw(-5), Some(-5));
        assert_eq!(Individual::new("x", 1, None).death_year_raw(), -1);
    }

    #[test]
    fn sentinel_death_year_is_stored_as_living() {
        let mut p = Individual::new("x", 1900, Some(LIVING_SENTINEL));
        assert_eq!(p.death_year(), None);
        assert_eq!(p.to_string(), "x (b. 1900)");

        p.set_death_year(Some(1950));
        assert_eq!(p.death_year(), Some(1950));
        p.set_death_year(Some(LIVING_SENTINEL));
        assert!(p.is_living());
    }
}
