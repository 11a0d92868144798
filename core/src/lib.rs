//! Positional inverted index over CACM-style bibliographic collections.
//!
//! The pipeline runs raw record text through section parsing
//! ([`parser`]), per-document term extraction with running positions
//! ([`document`]), and global postings construction ([`index`]).
//! [`persist`] writes the dictionary and postings files; [`query`]
//! serves single-term lookups with latency accounting.

pub mod document;
pub mod index;
pub mod parser;
pub mod persist;
pub mod query;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use document::{Collection, Document};
pub use index::InvertedIndex;
pub use query::{QueryEngine, QueryHit, QueryResult};
pub use stopwords::StopwordSet;

pub type DocId = u32;
/// 1-based word offset within a document's title-then-abstract stream.
pub type Position = u32;

/// Indexing behavior toggles, threaded through construction and query
/// normalization instead of living in process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    pub stopwords_on: bool,
    pub stemming_on: bool,
}
