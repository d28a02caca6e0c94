#[macro_use]
extern crate failure;

#[macro_use]
extern crate pest_derive;

pub mod io;
pub use io::{tree_from_str, tree_to_string, TreeIter, TreeWriter};

mod error;
pub use error::TreebankError;

mod node;
pub use node::{Node, NonTerminal, Terminal};

mod score;
pub use score::{brackets, score_corpus, score_pair, Bracket, Evaluation, Score};

mod span;
pub use span::Span;

mod transform;
pub use transform::{Binarize, Branching, Debinarize, Prune, CHAIN_SEP, SYNTHETIC_SUFFIX};

mod tree;
pub use tree::{Terminals, Tree};

mod vocab;
pub use vocab::{mask_corpus, mask_rare, TokenCounts, UNKNOWN_TOKEN};

pub mod util;
