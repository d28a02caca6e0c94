use std::io;

use failure::Fail;

/// Errors produced while reading, transforming or scoring trees.
#[derive(Debug, Fail)]
pub enum TreebankError {
    /// Malformed bracket text.
    #[fail(display = "syntax error on line {}: {}", line, message)]
    Syntax { line: usize, message: String },

    /// A tree violated an invariant assumed by a transformation.
    #[fail(display = "invariant violation: {}", _0)]
    Invariant(String),

    /// Hypothesis and gold trees cover different sentences.
    #[fail(display = "alignment error: {}", _0)]
    Alignment(String),

    /// Failure of the underlying reader.
    #[fail(display = "{}", _0)]
    Io(#[fail(cause)] io::Error),
}

impl From<io::Error> for TreebankError {
    fn from(err: io::Error) -> Self {
        TreebankError::Io(err)
    }
}
