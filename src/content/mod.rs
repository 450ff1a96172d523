mod load;
mod parse;
mod search;
mod source;
mod tree;

pub use load::{load_tree, parse_document};
pub use search::search_topics;
pub use tree::{NodeId, Record, RecordKind, Tree};
