//! Labeled bracket scoring.
//!
//! Trees are compared through their labeled brackets, the `(label, span)` pairs of their inner
//! nodes. The root is never counted, neither is a node covering the whole sentence whose only
//! child is another inner node; both wrap the analysis rather than contribute to it. Matching
//! respects multiplicity, a bracket occurring twice in the hypothesis matches at most twice.

use std::collections::HashMap;
use std::fmt;
use std::ops::AddAssign;

use crate::{Node, Span, Tree, TreebankError};

/// A labeled bracket.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Bracket {
    label: String,
    span: Span,
}

impl Bracket {
    pub(crate) fn new(label: impl Into<String>, span: Span) -> Self {
        Bracket {
            label: label.into(),
            span,
        }
    }

    /// Return the label of the bracket.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Return the covered span.
    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} {}..{})", self.label, self.span.start, self.span.end)
    }
}

/// Extract the scorable brackets of a tree.
pub fn brackets(tree: &Tree) -> Vec<Bracket> {
    let n_terminals = tree.n_terminals();
    let mut brackets = Vec::new();
    collect_brackets(tree.root(), 0, n_terminals, true, &mut brackets);
    brackets
}

// Returns the number of terminals below `node`.
fn collect_brackets(
    node: &Node,
    start: usize,
    n_terminals: usize,
    is_root: bool,
    brackets: &mut Vec<Bracket>,
) -> usize {
    let nt = match node {
        Node::Terminal(_) => return 1,
        Node::NonTerminal(nt) => nt,
    };

    let mut end = start;
    for child in nt.children() {
        end += collect_brackets(child, end, n_terminals, false, brackets);
    }

    let whole_sentence = start == 0 && end == n_terminals;
    let unary_wrapper = match nt.children() {
        [child] => !child.is_terminal(),
        _ => false,
    };
    if !is_root && !(whole_sentence && unary_wrapper) {
        brackets.push(Bracket::new(nt.label(), Span::new(start, end)));
    }

    end - start
}

fn match_brackets(hypothesis: &[Bracket], gold: &[Bracket]) -> usize {
    let mut remaining = HashMap::new();
    for bracket in gold {
        *remaining.entry(bracket).or_insert(0) += 1;
    }

    let mut matched = 0;
    for bracket in hypothesis {
        if let Some(count) = remaining.get_mut(bracket) {
            if *count > 0 {
                *count -= 1;
                matched += 1;
            }
        }
    }
    matched
}

/// Bracket counts of one or more scored tree pairs.
///
/// Scores over several pairs add up through `+=`; precision, recall and F1 are derived from the
/// summed counts, giving micro-averages on the corpus level.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Score {
    matched: usize,
    hypothesis: usize,
    gold: usize,
}

impl Score {
    pub(crate) fn new(matched: usize, hypothesis: usize, gold: usize) -> Self {
        Score {
            matched,
            hypothesis,
            gold,
        }
    }

    /// Get the number of matched brackets.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Get the number of hypothesis brackets.
    pub fn hypothesis(&self) -> usize {
        self.hypothesis
    }

    /// Get the number of gold brackets.
    pub fn gold(&self) -> usize {
        self.gold
    }

    /// Get the labeled precision, `0` when the hypothesis has no brackets.
    pub fn precision(&self) -> f64 {
        ratio(self.matched, self.hypothesis)
    }

    /// Get the labeled recall, `0` when the gold tree has no brackets.
    pub fn recall(&self) -> f64 {
        ratio(self.matched, self.gold)
    }

    /// Get the harmonic mean of precision and recall, `0` when both are `0`.
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0. {
            return 0.;
        }
        2. * precision * recall / (precision + recall)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, other: Score) {
        self.matched += other.matched;
        self.hypothesis += other.hypothesis;
        self.gold += other.gold;
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.;
    }
    numerator as f64 / denominator as f64
}

fn check_alignment(hypothesis: &Tree, gold: &Tree) -> Result<(), TreebankError> {
    if hypothesis.n_terminals() != gold.n_terminals() {
        return Err(TreebankError::Alignment(format!(
            "length mismatch: {} terminals in hypothesis, {} in gold",
            hypothesis.n_terminals(),
            gold.n_terminals()
        )));
    }
    for (idx, (hyp, gold)) in hypothesis.terminals().zip(gold.terminals()).enumerate() {
        if hyp.form() != gold.form() {
            return Err(TreebankError::Alignment(format!(
                "form mismatch at position {}: {} vs. {}",
                idx,
                hyp.form(),
                gold.form()
            )));
        }
    }
    Ok(())
}

/// Score a hypothesis tree against a gold tree.
///
/// Both trees have to cover the same sentence, pairs differing in length or in a surface form
/// are rejected.
pub fn score_pair(hypothesis: &Tree, gold: &Tree) -> Result<Score, TreebankError> {
    check_alignment(hypothesis, gold)?;
    let hypothesis = brackets(hypothesis);
    let gold = brackets(gold);
    let matched = match_brackets(&hypothesis, &gold);
    Ok(Score::new(matched, hypothesis.len(), gold.len()))
}

/// Corpus level evaluation result.
#[derive(Debug, Default)]
pub struct Evaluation {
    score: Score,
    flagged: Vec<(usize, TreebankError)>,
}

impl Evaluation {
    /// Get the aggregate score over the scorable pairs.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Get the pairs excluded from the aggregate, as indices into the corpus with the error
    /// that excluded them.
    pub fn flagged(&self) -> &[(usize, TreebankError)] {
        &self.flagged
    }
}

/// Score a corpus of hypothesis trees against the gold corpus.
///
/// Pairs that cannot be aligned are excluded from the aggregate score and reported in the
/// evaluation instead. Corpora of different sizes cannot be scored at all.
pub fn score_corpus(hypotheses: &[Tree], gold: &[Tree]) -> Result<Evaluation, TreebankError> {
    if hypotheses.len() != gold.len() {
        return Err(TreebankError::Alignment(format!(
            "corpus size mismatch: {} hypothesis trees, {} gold trees",
            hypotheses.len(),
            gold.len()
        )));
    }

    let mut evaluation = Evaluation::default();
    for (idx, (hypothesis, gold)) in hypotheses.iter().zip(gold).enumerate() {
        match score_pair(hypothesis, gold) {
            Ok(score) => evaluation.score += score,
            Err(err) => evaluation.flagged.push((idx, err)),
        }
    }
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::{brackets, match_brackets, score_corpus, score_pair, Bracket, Score};
    use crate::io::tree_from_str;
    use crate::{Span, Tree, TreebankError};

    fn sorted_brackets(tree: &Tree) -> Vec<String> {
        let mut found = brackets(tree)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        found.sort();
        found
    }

    #[test]
    fn bracket_extraction() {
        let tree = tree_from_str("(TOP (S (NP (DT the) (NN cat)) (VP (VBZ naps))))").unwrap();
        assert_eq!(
            sorted_brackets(&tree),
            vec!["(NP 0..2)", "(S 0..3)", "(VP 2..3)"]
        );
    }

    #[test]
    fn whole_sentence_wrappers_are_skipped() {
        let tree = tree_from_str("(TOP (S (NP (NN Everything))))").unwrap();
        assert_eq!(sorted_brackets(&tree), vec!["(NP 0..1)"]);
    }

    #[test]
    fn narrow_unary_nodes_are_counted() {
        let tree = tree_from_str("(TOP (S (NP (NP (DT a) (NN b))) (VB c)))").unwrap();
        assert_eq!(
            sorted_brackets(&tree),
            vec!["(NP 0..2)", "(NP 0..2)", "(S 0..3)"]
        );
    }

    #[test]
    fn matching_worked_example() {
        let hypothesis = vec![
            Bracket::new("NP", Span::new(0, 2)),
            Bracket::new("VP", Span::new(1, 4)),
        ];
        let gold = vec![
            Bracket::new("NP", Span::new(0, 2)),
            Bracket::new("VP", Span::new(1, 3)),
        ];
        let matched = match_brackets(&hypothesis, &gold);
        assert_eq!(matched, 1);
        let score = Score::new(matched, hypothesis.len(), gold.len());
        assert_eq!(score.precision(), 0.5);
        assert_eq!(score.recall(), 0.5);
        assert_eq!(score.f1(), 0.5);
    }

    #[test]
    fn tree_scores_one_against_itself() {
        let tree =
            tree_from_str("(TOP (S (NP (DT the) (NN cat)) (VP (VBZ naps) (ADVP (RB now)))))")
                .unwrap();
        let score = score_pair(&tree, &tree).unwrap();
        assert_eq!(score, Score::new(4, 4, 4));
        assert_eq!(score.precision(), 1.);
        assert_eq!(score.recall(), 1.);
        assert_eq!(score.f1(), 1.);
    }

    #[test]
    fn disjoint_trees_score_zero() {
        let hypothesis = tree_from_str("(TOP (X (A a) (B b)))").unwrap();
        let gold = tree_from_str("(TOP (Y (C a) (D b)))").unwrap();
        let score = score_pair(&hypothesis, &gold).unwrap();
        assert_eq!(score, Score::new(0, 1, 1));
        assert_eq!(score.f1(), 0.);
    }

    #[test]
    fn duplicate_brackets_match_once() {
        let hypothesis = tree_from_str("(TOP (S (NP (NP (DT a) (NN b))) (VB c)))").unwrap();
        let gold = tree_from_str("(TOP (S (NP (DT a) (NN b)) (VB c)))").unwrap();
        let score = score_pair(&hypothesis, &gold).unwrap();
        assert_eq!(score, Score::new(2, 3, 2));
        assert_eq!(score.recall(), 1.);
    }

    #[test]
    fn misaligned_pairs_are_rejected() {
        let gold = tree_from_str("(TOP (NP (DT the) (NN cat)))").unwrap();
        let too_long = tree_from_str("(TOP (NP (DT the) (JJ fat) (NN cat)))").unwrap();
        match score_pair(&too_long, &gold).unwrap_err() {
            TreebankError::Alignment(_) => (),
            other => panic!("unexpected error: {:?}", other),
        }
        let other_forms = tree_from_str("(TOP (NP (DT the) (NN dog)))").unwrap();
        match score_pair(&other_forms, &gold).unwrap_err() {
            TreebankError::Alignment(_) => (),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn corpus_skips_flagged_pairs() {
        let hypotheses = vec![
            tree_from_str("(TOP (S (NP (DT the) (NN cat)) (VP (VBZ naps))))").unwrap(),
            tree_from_str("(TOP (NP (DT the) (NN dog)))").unwrap(),
        ];
        let gold = vec![
            tree_from_str("(TOP (S (NP (DT the) (NN cat)) (VP (VBZ naps))))").unwrap(),
            tree_from_str("(TOP (NP (DT the) (NN cat)))").unwrap(),
        ];
        let evaluation = score_corpus(&hypotheses, &gold).unwrap();
        assert_eq!(evaluation.score(), Score::new(3, 3, 3));
        assert_eq!(evaluation.flagged().len(), 1);
        assert_eq!(evaluation.flagged()[0].0, 1);
    }

    #[test]
    fn corpus_size_mismatch_is_fatal() {
        let tree = tree_from_str("(TOP (NP (DT the) (NN cat)))").unwrap();
        let err = score_corpus(&[tree.clone()], &[tree.clone(), tree]).unwrap_err();
        match err {
            TreebankError::Alignment(_) => (),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
