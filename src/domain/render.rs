//! Text renderings of a family tree.
//!
//! Both renderings walk child lists depth-first without a visited set: a
//! person linked by two parents is printed once under each of them.

use termtree::Tree;
use tracing::{instrument, warn};

use crate::domain::arena::FamilyTree;
use crate::domain::entities::PersonId;
use crate::domain::error::DomainResult;

const BRANCH: &str = "|---";
const LAST_BRANCH: &str = "\\---";
const PIPE_INDENT: &str = "|  ";
const BLANK_INDENT: &str = "   ";

impl FamilyTree {
    /// ASCII rendering of the subtree under `root`, one line per person.
    ///
    /// ```text
    ///  [Gen 1] A (b. 1900)
    ///    \--- [Gen 2] B (b. 1930)
    ///       \--- [Gen 3] C (b. 1960)
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn render_family_tree(&self, root: PersonId) -> DomainResult<String> {
        self.get_person(root)?;
        let mut out = String::new();
        self.render_person(root, "", true, 1, &mut out);
        Ok(out)
    }

    fn render_person(
        &self,
        id: PersonId,
        prefix: &str,
        is_last: bool,
        generation: usize,
        out: &mut String,
    ) {
        let Ok(person) = self.get_person(id) else {
            return;
        };

        out.push_str(prefix);
        if !prefix.is_empty() {
            out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        }
        out.push_str(&format!(" [Gen {}] {}\n", generation, person));

        let children = person.children();
        if children.is_empty() {
            return;
        }
        let child_prefix = format!(
            "{}{}",
            prefix,
            if is_last { BLANK_INDENT } else { PIPE_INDENT }
        );
        for (i, &child) in children.iter().enumerate() {
            let child_is_last = i + 1 == children.len();
            self.render_person(child, &child_prefix, child_is_last, generation + 1, out);
        }
    }

    /// Print the ASCII rendering to stdout.
    ///
    /// An invalid root prints a diagnostic instead of failing.
    pub fn print_family_tree(&self, root: PersonId) {
        match self.render_family_tree(root) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                warn!("cannot print tree: {}", e);
                println!("[Invalid root index: {}]", root);
            }
        }
    }

    /// Convert the subtree under `root` into a `termtree` for Unicode output.
    #[instrument(level = "debug", skip(self))]
    pub fn to_termtree(&self, root: PersonId) -> DomainResult<Tree<String>> {
        let person = self.get_person(root)?;
        let leaves: Vec<_> = person
            .children()
            .iter()
            .filter_map(|&child| self.to_termtree(child).ok())
            .collect();
        Ok(Tree::new(person.to_string()).with_leaves(leaves))
    }
}
