mod bracket;
pub use crate::io::bracket::{tree_from_str, tree_to_string, TreeIter, TreeWriter};
