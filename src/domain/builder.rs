//! Builder for the default family tree.
//!
//! The seed is the British royal line from Queen Victoria down to the
//! children of Elizabeth II. Insertion and link order are fixed so that ids
//! match previously saved data files.

use tracing::{debug, instrument};

use crate::domain::arena::FamilyTree;
use crate::domain::entities::PersonId;

/// (name, birth year, death year)
type SeedPerson = (&'static str, i32, Option<i32>);

const SEED_PEOPLE: &[SeedPerson] = &[
    ("Queen Victoria", 1819, Some(1901)),
    ("Prince Albert of Saxe-Coburg and Gotha", 1819, Some(1861)),
    ("King Edward VII", 1841, Some(1910)),
    ("Alexandra of Denmark", 1844, Some(1925)),
    ("King George V", 1865, Some(1936)),
    ("Queen Mary of Teck", 1867, Some(1953)),
    ("King Edward VIII (Duke of Windsor)", 1894, Some(1972)),
    ("Wallis Simpson, Duchess of Windsor", 1896, Some(1986)),
    ("King George VI", 1895, Some(1952)),
    ("Elizabeth Bowes-Lyon (Queen Mother)", 1900, Some(2002)),
    ("Queen Elizabeth II", 1926, Some(2022)),
    ("Prince Philip, Duke of Edinburgh", 1921, Some(2021)),
    ("Princess Margaret, Countess of Snowdon", 1930, Some(2002)),
    ("King Charles III", 1948, None),
    ("Diana, Princess of Wales", 1961, Some(1997)),
    ("Queen Camilla", 1947, None),
    ("Anne, Princess Royal", 1950, None),
    ("Prince Andrew, Duke of York", 1960, None),
    ("Prince Edward, Duke of Edinburgh", 1964, None),
];

// Positions in SEED_PEOPLE
const VICTORIA: usize = 0;
const ALBERT: usize = 1;
const EDWARD_VII: usize = 2;
const ALEXANDRA: usize = 3;
const GEORGE_V: usize = 4;
const MARY_TECK: usize = 5;
const EDWARD_VIII: usize = 6;
const GEORGE_VI: usize = 8;
const ELIZABETH_BOWES: usize = 9;
const ELIZABETH_II: usize = 10;
const PHILIP: usize = 11;
const MARGARET: usize = 12;
const CHARLES: usize = 13;
const DIANA: usize = 14;
const CAMILLA: usize = 15;
const ANNE: usize = 16;
const ANDREW: usize = 17;
const EDWARD: usize = 18;

/// (parent, child) pairs in link order
const SEED_LINKS: &[(usize, usize)] = &[
    (VICTORIA, EDWARD_VII),
    (ALBERT, EDWARD_VII),
    (EDWARD_VII, GEORGE_V),
    (ALEXANDRA, GEORGE_V),
    (GEORGE_V, EDWARD_VIII),
    (MARY_TECK, EDWARD_VIII),
    (GEORGE_V, GEORGE_VI),
    (MARY_TECK, GEORGE_VI),
    (GEORGE_VI, ELIZABETH_II),
    (ELIZABETH_BOWES, ELIZABETH_II),
    (GEORGE_VI, MARGARET),
    (ELIZABETH_BOWES, MARGARET),
    (ELIZABETH_II, CHARLES),
    (PHILIP, CHARLES),
    (ELIZABETH_II, ANNE),
    (PHILIP, ANNE),
    (ELIZABETH_II, ANDREW),
    (PHILIP, ANDREW),
    (ELIZABETH_II, EDWARD),
    (PHILIP, EDWARD),
    // Charles and his two partners
    (CHARLES, DIANA),
    (CHARLES, CAMILLA),
];

/// Inserts the default lineage through the tree's public API.
#[derive(Debug, Default)]
pub struct SeedBuilder;

impl SeedBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Number of people the seed inserts.
    pub fn len(&self) -> usize {
        SEED_PEOPLE.len()
    }

    pub fn is_empty(&self) -> bool {
        SEED_PEOPLE.is_empty()
    }

    /// Append the seed to `tree`; seed positions are offset by the tree's
    /// current size so links stay correct on a non-empty tree.
    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, tree: &mut FamilyTree) {
        let ids: Vec<PersonId> = SEED_PEOPLE
            .iter()
            .map(|&(name, birth, death)| tree.add_person(name, birth, death))
            .collect();

        for &(parent, child) in SEED_LINKS {
            tree.connect_parent_child(ids[parent], ids[child]);
        }
        debug!(
            "seeded {} people with {} links",
            ids.len(),
            SEED_LINKS.len()
        );
    }
}
