use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::Genealogy;
use crate::domain::entities::{Vampire, VampireId};
use crate::domain::error::DomainResult;

pub trait GenealogyRender {
    fn to_tree_string(&self, root: VampireId) -> DomainResult<Tree<String>>;
}

impl GenealogyRender for Genealogy {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: VampireId) -> DomainResult<Tree<String>> {
        fn build_tree(
            genealogy: &Genealogy,
            id: VampireId,
            parent_tree: &mut Tree<String>,
        ) -> DomainResult<()> {
            for &child_id in genealogy.offspring(id)? {
                let mut child_tree = Tree::new(label(genealogy, genealogy.vampire(child_id)?));
                build_tree(genealogy, child_id, &mut child_tree)?;
                parent_tree.push(child_tree);
            }
            Ok(())
        }

        let mut tree = Tree::new(label(self, self.vampire(root)?));
        build_tree(self, root, &mut tree)?;
        Ok(tree)
    }
}

fn label(genealogy: &Genealogy, vampire: &Vampire) -> String {
    if genealogy.settings().show_years {
        vampire.to_string()
    } else {
        vampire.name.clone()
    }
}

impl Genealogy {
    /// Names from `id` up to the original vampire, e.g. `Andrew <- Sarah <- Ansel`.
    pub fn lineage(&self, id: VampireId) -> DomainResult<String> {
        let names = std::iter::once(id)
            .chain(self.ancestors(id)?)
            .map(|ancestor| self.vampire(ancestor).map(|v| v.name.as_str()))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(names.iter().join(" <- "))
    }
}
