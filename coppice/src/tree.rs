use crate::{Node, Terminal};

/// `Tree`
///
/// `Tree`s represent constituency trees and consist of `Node`s. The nodes are either
/// `Terminal`s or `NonTerminal`s; every node owns its children. Two trees are equal if their
/// nodes are structurally equal, regardless of how the trees were produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub(crate) fn new(root: Node) -> Self {
        Tree { root }
    }

    /// Get the root of the tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Get the number of terminals in the tree.
    pub fn n_terminals(&self) -> usize {
        self.terminals().count()
    }

    /// Get an iterator over the terminals in the constituency tree, in sentence order.
    pub fn terminals(&self) -> Terminals {
        Terminals::new(&self.root)
    }
}

/// Iterator over the `Terminal`s of a tree.
pub struct Terminals<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Terminals<'a> {
    fn new(root: &'a Node) -> Self {
        Terminals { stack: vec![root] }
    }
}

impl<'a> Iterator for Terminals<'a> {
    type Item = &'a Terminal;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Terminal(terminal) => return Some(terminal),
                Node::NonTerminal(nt) => {
                    // reversed so that the leftmost child is popped first
                    self.stack.extend(nt.children().iter().rev());
                }
            }
        }
        None
    }
}
