//! Tree transformations preparing treebanks for parser training.
//!
//! `Binarize` converts arbitrary-branching trees into strictly binary ones: unary chains over
//! inner nodes collapse into a single node with a `_`-joined label and nodes with more than two
//! children fold into a cascade of `*`-marked synthetic nodes. `Debinarize` is the exact inverse;
//! for every tree `t` accepted by the binarizer, `t.binarize(..).and_then(|b| b.debinarize())`
//! yields a tree equal to `t`.

use failure::Error;

use crate::util::LabelSet;
use crate::{Node, NonTerminal, Tree, TreebankError};

/// Separator joining the labels of a collapsed unary chain.
pub const CHAIN_SEP: char = '_';

/// Suffix marking the synthetic nodes of a binarization cascade.
pub const SYNTHETIC_SUFFIX: char = '*';

/// Direction of the cascade introduced for nodes with more than two children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Branching {
    /// Fold leading children into a left-branching cascade.
    Left,
    /// Fold trailing children into a right-branching cascade.
    Right,
}

impl Branching {
    pub fn try_from_str(s: &str) -> Result<Branching, Error> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Branching::Left),
            "right" => Ok(Branching::Right),
            _ => Err(format_err!("Unknown branching direction: {}", s)),
        }
    }
}

/// Trait to binarize trees.
pub trait Binarize {
    /// Binarize the tree.
    ///
    /// Transforms children before their parent. Unary chains over inner nodes collapse into one
    /// node with the chain's labels joined by `CHAIN_SEP` in top-to-bottom order; a node whose
    /// single child is a terminal is left alone. Nodes with more than two children fold into a
    /// `branching` cascade of synthetic nodes labeled with the original label plus
    /// `SYNTHETIC_SUFFIX`. A root labeled `top_label` is exempt from unary collapsing so that
    /// the wrapper survives.
    ///
    /// Returns an error if a label of the input tree contains one of the reserved markers.
    fn binarize(&self, top_label: &str, branching: Branching) -> Result<Tree, TreebankError>;
}

/// Trait to undo binarization.
pub trait Debinarize {
    /// Undo binarization.
    ///
    /// Splices the children of `*`-marked synthetic nodes back into their parent's child list and
    /// re-expands `_`-joined labels into unary chains, outermost label first. The result of
    /// binarizing a tree and debinarizing it again is the original tree, regardless of the
    /// branching direction used.
    ///
    /// Returns an error for trees that no binarizer output could contain: a synthetic node with
    /// fewer than two children, a synthetic root or an empty chain segment.
    fn debinarize(&self) -> Result<Tree, TreebankError>;
}

/// Trait to remove terminals by part-of-speech tag.
pub trait Prune {
    /// Remove terminals whose tag is matched by `tag_set`.
    ///
    /// Inner nodes left without children are removed as well. Removing every terminal of the
    /// tree is an error.
    fn prune_terminals(&self, tag_set: &LabelSet) -> Result<Tree, TreebankError>;
}

impl Binarize for Tree {
    fn binarize(&self, top_label: &str, branching: Branching) -> Result<Tree, TreebankError> {
        let root = binarize_node(self.root(), true, top_label, branching)?;
        Ok(Tree::new(root))
    }
}

impl Debinarize for Tree {
    fn debinarize(&self) -> Result<Tree, TreebankError> {
        let mut nodes = debinarize_node(self.root())?;
        if nodes.len() != 1 {
            return Err(TreebankError::Invariant(format!(
                "root {} is a synthetic node",
                self.root().label()
            )));
        }
        // guarded by the length check above
        Ok(Tree::new(nodes.pop().unwrap()))
    }
}

impl Prune for Tree {
    fn prune_terminals(&self, tag_set: &LabelSet) -> Result<Tree, TreebankError> {
        match prune_node(self.root(), tag_set) {
            Some(root) => Ok(Tree::new(root)),
            None => Err(TreebankError::Invariant(
                "no terminals left after pruning".to_owned(),
            )),
        }
    }
}

fn binarize_node(
    node: &Node,
    is_root: bool,
    top_label: &str,
    branching: Branching,
) -> Result<Node, TreebankError> {
    let nt = match node {
        Node::Terminal(terminal) => return Ok(Node::Terminal(terminal.clone())),
        Node::NonTerminal(nt) => nt,
    };
    check_label(nt.label())?;

    let mut label = nt.label().to_owned();
    let mut children = nt
        .children()
        .iter()
        .map(|child| binarize_node(child, false, top_label, branching))
        .collect::<Result<Vec<_>, _>>()?;

    // Collapse unary chains over inner nodes. The top wrapper is kept as a unary node.
    let keep_wrapper = is_root && label == top_label;
    if !keep_wrapper {
        while children.len() == 1 && !children[0].is_terminal() {
            let child = match children.pop() {
                Some(Node::NonTerminal(child)) => child,
                _ => unreachable!(),
            };
            let (child_label, grandchildren) = child.into_parts();
            label.push(CHAIN_SEP);
            label.push_str(&child_label);
            children = grandchildren;
        }
    }

    if children.len() > 2 {
        children = cascade(&label, children, branching);
    }

    Ok(Node::NonTerminal(NonTerminal::new(label, children)))
}

// Labels may not contain the markers that encode the transformation.
fn check_label(label: &str) -> Result<(), TreebankError> {
    if label.contains(SYNTHETIC_SUFFIX) || label.contains(CHAIN_SEP) {
        return Err(TreebankError::Invariant(format!(
            "label {} contains a reserved marker",
            label
        )));
    }
    Ok(())
}

// Fold more than two children into a binary cascade of nodes labeled `label*`. The synthetic
// label is the same on every level of the cascade.
fn cascade(label: &str, mut children: Vec<Node>, branching: Branching) -> Vec<Node> {
    debug_assert!(children.len() > 2);
    let synthetic = format!("{}{}", label, SYNTHETIC_SUFFIX);
    match branching {
        Branching::Right => {
            let rest = children.split_off(1);
            let mut iter = rest.into_iter().rev();
            // more than two children guarantee the cascade is non-empty
            let mut node = iter.next().unwrap();
            for child in iter {
                node = Node::NonTerminal(NonTerminal::new(synthetic.clone(), vec![child, node]));
            }
            children.push(node);
            children
        }
        Branching::Left => {
            let last = children.pop().unwrap();
            let mut iter = children.into_iter();
            let mut node = iter.next().unwrap();
            for child in iter {
                node = Node::NonTerminal(NonTerminal::new(synthetic.clone(), vec![node, child]));
            }
            vec![node, last]
        }
    }
}

// Expand a node into the sequence it contributes to its parent's child list. Synthetic nodes
// dissolve into their children, chain labels re-expand into unary chains.
fn debinarize_node(node: &Node) -> Result<Vec<Node>, TreebankError> {
    let nt = match node {
        Node::Terminal(terminal) => return Ok(vec![Node::Terminal(terminal.clone())]),
        Node::NonTerminal(nt) => nt,
    };

    let mut children = Vec::with_capacity(nt.children().len());
    for child in nt.children() {
        children.extend(debinarize_node(child)?);
    }

    if nt.label().ends_with(SYNTHETIC_SUFFIX) {
        if nt.children().len() < 2 {
            return Err(TreebankError::Invariant(format!(
                "synthetic node {} has fewer than two children",
                nt.label()
            )));
        }
        return Ok(children);
    }

    if nt.label().split(CHAIN_SEP).any(str::is_empty) {
        return Err(TreebankError::Invariant(format!(
            "malformed chain label {}",
            nt.label()
        )));
    }

    let mut labels = nt.label().rsplit(CHAIN_SEP);
    // a label without separator yields itself
    let mut node = Node::NonTerminal(NonTerminal::new(labels.next().unwrap(), children));
    for label in labels {
        node = Node::NonTerminal(NonTerminal::new(label, vec![node]));
    }
    Ok(vec![node])
}

fn prune_node(node: &Node, tag_set: &LabelSet) -> Option<Node> {
    match node {
        Node::Terminal(terminal) => {
            if tag_set.matches(terminal.label()) {
                None
            } else {
                Some(Node::Terminal(terminal.clone()))
            }
        }
        Node::NonTerminal(nt) => {
            let children = nt
                .children()
                .iter()
                .filter_map(|child| prune_node(child, tag_set))
                .collect::<Vec<_>>();
            if children.is_empty() {
                None
            } else {
                Some(Node::NonTerminal(NonTerminal::new(nt.label(), children)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Binarize, Branching, Debinarize, Prune};
    use crate::io::{tree_from_str, tree_to_string};
    use crate::util::LabelSet;
    use crate::{Node, Tree, TreebankError};

    fn binarize_right(input: &str) -> Tree {
        tree_from_str(input)
            .unwrap()
            .binarize("TOP", Branching::Right)
            .unwrap()
    }

    #[test]
    fn wide_node_right() {
        let binarized = binarize_right("(TOP (X (A a) (B b) (C c) (D d)))");
        assert_eq!(
            tree_to_string(&binarized),
            "(TOP (X (A a) (X* (B b) (X* (C c) (D d)))))"
        );
    }

    #[test]
    fn wide_node_left() {
        let binarized = tree_from_str("(TOP (X (A a) (B b) (C c) (D d)))")
            .unwrap()
            .binarize("TOP", Branching::Left)
            .unwrap();
        assert_eq!(
            tree_to_string(&binarized),
            "(TOP (X (X* (X* (A a) (B b)) (C c)) (D d)))"
        );
    }

    #[test]
    fn collapse_unary_chain() {
        let binarized = binarize_right("(TOP (S (X (A a) (B b))))");
        assert_eq!(tree_to_string(&binarized), "(TOP (S_X (A a) (B b)))");
        let deep = binarize_right("(TOP (A (B (C (D d)))))");
        assert_eq!(tree_to_string(&deep), "(TOP (A_B_C (D d)))");
    }

    #[test]
    fn pos_above_word_not_collapsed() {
        let binarized = binarize_right("(TOP (NP (DT that)))");
        assert_eq!(tree_to_string(&binarized), "(TOP (NP (DT that)))");
    }

    #[test]
    fn root_exemption_depends_on_top_label() {
        let tree = tree_from_str("(S (NP (DT the) (NN cat)))").unwrap();
        let kept = tree.binarize("S", Branching::Right).unwrap();
        assert_eq!(tree_to_string(&kept), "(S (NP (DT the) (NN cat)))");
        let collapsed = tree.binarize("TOP", Branching::Right).unwrap();
        assert_eq!(tree_to_string(&collapsed), "(S_NP (DT the) (NN cat))");
    }

    #[test]
    fn root_cascades_like_any_node() {
        let binarized = binarize_right("(TOP (A a) (B b) (C c))");
        assert_eq!(tree_to_string(&binarized), "(TOP (A a) (TOP* (B b) (C c)))");
    }

    #[test]
    fn book_that_flight() {
        let input = "(TOP (S (VP (VB Book) (NP (DT that) (NN flight)))) (PUNC .))";
        let binarized = binarize_right(input);
        assert_eq!(
            tree_to_string(&binarized),
            "(TOP (S_VP (VB Book) (NP (DT that) (NN flight))) (PUNC .))"
        );
        let restored = binarized.debinarize().unwrap();
        assert_eq!(tree_to_string(&restored), input);
    }

    #[test]
    fn round_trip() {
        let fixtures = [
            "(T t)",
            "(TOP (NP (NN word)))",
            "(TOP (S (NP (DT the) (NN cat)) (VP (VBZ naps))) (PUNC .))",
            "(TOP (S (VP (VB Book) (NP (DT that) (NN flight)))) (PUNC .))",
            "(TOP (A (B (C (D (E e) (F f))))))",
            "(TOP (X (A a) (B b) (C c) (D d) (E e) (F f) (G g) (H h) (I i) (J j) (K k) (L l)))",
            "(S (A (B (X x)) (C c) (D d)))",
            "(TOP (A a) (B b) (C c))",
        ];
        for input in &fixtures {
            let tree = tree_from_str(input).unwrap();
            for &branching in &[Branching::Left, Branching::Right] {
                let restored = tree
                    .binarize("TOP", branching)
                    .unwrap()
                    .debinarize()
                    .unwrap();
                assert_eq!(restored, tree, "round trip failed for {}", input);
            }
        }
    }

    #[test]
    fn arity_after_binarize() {
        fn check(node: &Node, is_root: bool) {
            let nt = match node.nonterminal() {
                Some(nt) => nt,
                None => return,
            };
            match nt.children() {
                [child] => assert!(is_root || child.is_terminal()),
                [_, _] => (),
                children => panic!("{} children under {}", children.len(), nt.label()),
            }
            for child in nt.children() {
                check(child, false);
            }
        }
        let input =
            "(TOP (S (X (A a) (B b) (C c) (D d) (E e)) (Y (U (V (W w)))) (Z z)) (PUNC .))";
        for &branching in &[Branching::Left, Branching::Right] {
            let binarized = tree_from_str(input)
                .unwrap()
                .binarize("TOP", branching)
                .unwrap();
            check(binarized.root(), true);
        }
    }

    #[test]
    fn rejects_reserved_markers() {
        for input in &["(TOP (N* (A a) (B b)))", "(TOP (A_B (X x) (Y y)))"] {
            let err = tree_from_str(input)
                .unwrap()
                .binarize("TOP", Branching::Right)
                .unwrap_err();
            match err {
                TreebankError::Invariant(_) => (),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn debinarize_rejects_corrupt_trees() {
        let corrupt = [
            // synthetic node with a single child
            "(TOP (X (A a) (X* (B b))))",
            // synthetic root has no parent to splice into
            "(X* (A a) (B b))",
            // empty chain segment
            "(TOP (A_ (B b)))",
        ];
        for input in &corrupt {
            let err = tree_from_str(input).unwrap().debinarize().unwrap_err();
            match err {
                TreebankError::Invariant(_) => (),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn debinarize_splices_wider_cascades() {
        let tree = tree_from_str("(TOP (X (A a) (X* (B b) (C c) (D d))))").unwrap();
        let restored = tree.debinarize().unwrap();
        assert_eq!(
            tree_to_string(&restored),
            "(TOP (X (A a) (B b) (C c) (D d)))"
        );
    }

    #[test]
    fn prune_empty_elements() {
        let mut set = HashSet::new();
        set.insert("-NONE-".to_string());
        let set = LabelSet::Positive(set);
        let tree =
            tree_from_str("(TOP (S (NP-SBJ (-NONE- *T*)) (VP (VB go) (NP (NN home)))) (PUNC .))")
                .unwrap();
        let pruned = tree.prune_terminals(&set).unwrap();
        assert_eq!(
            tree_to_string(&pruned),
            "(TOP (S (VP (VB go) (NP (NN home)))) (PUNC .))"
        );
    }

    #[test]
    fn prune_whole_tree_fails() {
        let mut set = HashSet::new();
        set.insert("-NONE-".to_string());
        let tree = tree_from_str("(TOP (S (-NONE- *T*)))").unwrap();
        assert!(tree.prune_terminals(&LabelSet::Positive(set)).is_err());
    }
}
