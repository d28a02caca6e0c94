use std::collections::HashMap;

use crate::{Node, Tree};

/// Replacement form for rare tokens.
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// Surface form frequencies of a corpus.
#[derive(Clone, Debug, Default)]
pub struct TokenCounts {
    counts: HashMap<String, usize>,
}

impl TokenCounts {
    /// Count the surface forms of a corpus.
    pub fn from_corpus<'a>(corpus: impl IntoIterator<Item = &'a Tree>) -> Self {
        let mut counts = HashMap::new();
        for tree in corpus {
            for terminal in tree.terminals() {
                *counts.entry(terminal.form().to_owned()).or_insert(0) += 1;
            }
        }
        TokenCounts { counts }
    }

    /// Get the frequency of a form, `0` for unseen forms.
    pub fn count(&self, form: &str) -> usize {
        self.counts.get(form).cloned().unwrap_or(0)
    }
}

/// Replace the forms of rare terminals with `UNKNOWN_TOKEN`.
///
/// A form is rare if it occurs less than twice in the corpus the counts were drawn from. Tags
/// and the tree structure are left untouched. Masking is idempotent: the unknown token is itself
/// a form of the masked corpus and never counts as rare.
pub fn mask_rare(tree: &Tree, counts: &TokenCounts) -> Tree {
    let mut masked = tree.clone();
    mask_node(masked.root_mut(), counts);
    masked
}

/// Mask the rare forms of a corpus against its own counts.
pub fn mask_corpus(corpus: &[Tree]) -> Vec<Tree> {
    let counts = TokenCounts::from_corpus(corpus);
    corpus
        .iter()
        .map(|tree| mask_rare(tree, &counts))
        .collect()
}

fn mask_node(node: &mut Node, counts: &TokenCounts) {
    match node {
        Node::Terminal(terminal) => {
            if counts.count(terminal.form()) < 2 {
                terminal.set_form(UNKNOWN_TOKEN);
            }
        }
        Node::NonTerminal(nt) => {
            for child in nt.children_mut() {
                mask_node(child, counts);
            }
        }
    }
}
