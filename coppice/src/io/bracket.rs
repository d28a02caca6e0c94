use std::io::{BufRead, Lines, Write};

use failure::Error;
use itertools::Itertools;
use pest::iterators::Pair;
use pest::Parser;

use crate::{Node, NonTerminal, Terminal, Tree, TreebankError};

// dummy struct required by pest
#[derive(Parser)]
#[grammar = "io/bracket.pest"]
struct BracketParser;

/// Parse a tree from single-line bracket notation.
///
/// Nonterminals are written as `(LABEL child ...)`, terminals as `(TAG form)`. Labels and forms
/// are runs of characters excluding whitespace and parentheses, so empty labels and terminals
/// without a form fail to parse.
pub fn tree_from_str(string: &str) -> Result<Tree, Error> {
    let mut parsed_line = BracketParser::parse(Rule::tree, string)?;
    // the tree rule always holds exactly one node
    let root = parse_value(parsed_line.next().unwrap());
    Ok(Tree::new(root))
}

fn parse_value(pair: Pair<Rule>) -> Node {
    match pair.as_rule() {
        Rule::nonterminal => {
            let mut pairs = pair.into_inner();
            // first pair after matching nonterminal is always the label of the inner node
            let label = pairs.next().unwrap().as_str();
            let children = pairs.map(parse_value).collect();
            Node::NonTerminal(NonTerminal::new(label, children))
        }
        Rule::preterminal => {
            let mut pairs = pair.into_inner();
            let pos = pairs.next().unwrap().as_str();
            let form = pairs.next().unwrap().as_str();
            Node::Terminal(Terminal::new(form, pos))
        }
        _ => unreachable!(),
    }
}

/// Serialize a tree to single-line bracket notation.
///
/// The output is the canonical form accepted by `tree_from_str`: children separated by single
/// spaces, no trailing whitespace.
pub fn tree_to_string(tree: &Tree) -> String {
    format_sub_tree(tree.root())
}

fn format_sub_tree(node: &Node) -> String {
    match node {
        Node::Terminal(terminal) => format!("({} {})", terminal.label(), terminal.form()),
        Node::NonTerminal(nt) => format!(
            "({} {})",
            nt.label(),
            nt.children().iter().map(format_sub_tree).join(" ")
        ),
    }
}

/// Iterator over trees in a bracketed corpus file.
///
/// Yields one tree per line. Lines that are empty or start with `'%'` are skipped. Syntax errors
/// carry the 1-based number of the offending line so that callers can report and continue with
/// the next line.
pub struct TreeIter<R> {
    inner: Lines<R>,
    line: usize,
}

impl<R> TreeIter<R>
where
    R: BufRead,
{
    /// Constructs a new tree iterator.
    pub fn new(read: R) -> Self {
        TreeIter {
            inner: read.lines(),
            line: 0,
        }
    }
}

impl<R> Iterator for TreeIter<R>
where
    R: BufRead,
{
    type Item = Result<Tree, TreebankError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.inner.next() {
            self.line += 1;
            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            if line.trim().is_empty() || line.starts_with('%') {
                continue;
            }
            let line_no = self.line;
            return Some(tree_from_str(&line).map_err(|err| TreebankError::Syntax {
                line: line_no,
                message: err.to_string(),
            }));
        }
        None
    }
}

/// Writer for bracketed corpus files.
pub struct TreeWriter<W> {
    write: W,
}

impl<W> TreeWriter<W>
where
    W: Write,
{
    /// Constructs a new tree writer.
    pub fn new(write: W) -> Self {
        TreeWriter { write }
    }

    /// Write a tree on its own line.
    pub fn write_tree(&mut self, tree: &Tree) -> Result<(), Error> {
        writeln!(self.write, "{}", tree_to_string(tree))?;
        Ok(())
    }
}
