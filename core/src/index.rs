use crate::document::Collection;
use crate::stopwords::StopwordSet;
use crate::{DocId, IndexOptions};
use std::collections::BTreeMap;

/// Global term -> posting-list mapping. Keys iterate in alphabetical
/// order and posting lists are ascending, deduplicated document ids, so
/// serialization is deterministic for a given collection and options.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    /// Invert a collection. When stopwords are enabled the stopword keys
    /// are deleted from the finished index as well; this second pass is
    /// independent of the per-document filtering and covers terms however
    /// they entered the index.
    pub fn build(
        collection: &Collection,
        options: &IndexOptions,
        stopwords: Option<&StopwordSet>,
    ) -> InvertedIndex {
        let mut postings: BTreeMap<String, Vec<DocId>> = BTreeMap::new();
        for doc in collection.iter() {
            for term in doc.term_positions.keys() {
                postings.entry(term.clone()).or_default().push(doc.id);
            }
        }
        // Terms are distinct per document and documents arrive in id
        // order, so the lists are already sorted; normalize anyway so the
        // invariant does not depend on the construction path.
        for list in postings.values_mut() {
            list.sort_unstable();
            list.dedup();
        }

        let mut index = InvertedIndex { postings };
        if options.stopwords_on {
            if let Some(set) = stopwords {
                index.remove_stopwords(set);
            }
        }
        tracing::info!(terms = index.num_terms(), "built inverted index");
        index
    }

    /// Delete every stopword key outright, postings and all.
    pub fn remove_stopwords(&mut self, stopwords: &StopwordSet) {
        let before = self.postings.len();
        self.postings.retain(|term, _| !stopwords.contains(term));
        tracing::debug!(removed = before - self.postings.len(), "removed stopword terms from index");
    }

    /// Posting list for `term`, ascending document ids.
    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    /// All terms with their posting lists, in alphabetical term order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
