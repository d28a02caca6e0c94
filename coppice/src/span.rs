/// Span of a node.
///
/// Spans are non-empty ranges over the terminals covered by a node, 0-based and non-inclusive of
/// `end`. Spans order by `start`, then by `end`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Span {
    /// Lower bound of the span.
    pub start: usize,
    /// Upper bound of the span.
    pub end: usize,
}

impl Span {
    /// Create a new continuous span.
    pub(crate) fn new(start: usize, end: usize) -> Self {
        assert!(start < end, "Span start has to be smaller than end.");
        Span { start, end }
    }

    /// Get this span's bounds as a tuple.
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Get the number of indices covered.
    pub fn n_indices(&self) -> usize {
        self.end - self.start
    }
}
