//! Per-document term extraction and the id-addressable collection.

use crate::parser::{self, extract_sections, RawRecord, RecordSections};
use crate::stemmer;
use crate::stopwords::StopwordSet;
use crate::tokenizer;
use crate::{DocId, IndexOptions, Position};
use anyhow::{ensure, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// One bibliographic record, immutable after construction.
///
/// `term_positions` maps each normalized term to its 1-based positions in
/// the title-then-abstract word stream; the counter runs across both
/// sections without resetting, so each position list is strictly ascending.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub starting_line: usize,
    pub title_lines: Vec<String>,
    pub abstract_lines: Vec<String>,
    pub publication_date: Option<String>,
    pub authors: Vec<String>,
    pub full_title: String,
    pub term_positions: BTreeMap<String, Vec<Position>>,
}

impl Document {
    pub fn from_record(
        record: &RawRecord,
        options: &IndexOptions,
        stopwords: Option<&StopwordSet>,
    ) -> Result<Document> {
        let sections = extract_sections(record)?;
        Ok(Document::from_sections(sections, options, stopwords))
    }

    fn from_sections(
        sections: RecordSections,
        options: &IndexOptions,
        stopwords: Option<&StopwordSet>,
    ) -> Document {
        let full_title = sections
            .title_lines
            .iter()
            .map(String::as_str)
            .collect::<String>()
            .trim_start()
            .to_string();

        let mut terms: Vec<(String, Position)> = Vec::new();
        let mut position: Position = 0;
        for line in sections.title_lines.iter().chain(&sections.abstract_lines) {
            for term in tokenizer::line_terms(line) {
                let term = if options.stemming_on {
                    stemmer::stem(&term)
                } else {
                    term
                };
                position += 1;
                terms.push((term, position));
            }
        }

        // Filter into a fresh list; removing from the list being walked
        // skips the entry after each removal.
        if options.stopwords_on {
            if let Some(set) = stopwords {
                terms.retain(|(term, _)| !set.contains(term));
            }
        }

        let mut term_positions: BTreeMap<String, Vec<Position>> = BTreeMap::new();
        for (term, pos) in terms {
            term_positions.entry(term).or_default().push(pos);
        }

        Document {
            id: sections.id,
            starting_line: sections.starting_line,
            title_lines: sections.title_lines,
            abstract_lines: sections.abstract_lines,
            publication_date: sections.publication_date,
            authors: sections.author_lines,
            full_title,
            term_positions,
        }
    }

    /// Positions of `term` in this document, if it occurs.
    pub fn positions(&self, term: &str) -> Option<&[Position]> {
        self.term_positions.get(term).map(Vec::as_slice)
    }

    /// Occurrences of `term` in this document.
    pub fn term_frequency(&self, term: &str) -> usize {
        self.term_positions.get(term).map_or(0, Vec::len)
    }
}

/// All documents of one collection, addressable by id. Document ids are
/// 1-based and must match parse order; the arena index is `id - 1`.
#[derive(Debug, Default)]
pub struct Collection {
    docs: Vec<Document>,
}

impl Collection {
    /// Read, split, and build every document of a collection file.
    pub fn load(
        path: &Path,
        options: &IndexOptions,
        stopwords: Option<&StopwordSet>,
    ) -> Result<Collection> {
        let records = parser::load_records(path)?;
        Collection::from_records(&records, options, stopwords)
    }

    pub fn from_records(
        records: &[RawRecord],
        options: &IndexOptions,
        stopwords: Option<&StopwordSet>,
    ) -> Result<Collection> {
        let mut docs = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let doc = Document::from_record(record, options, stopwords)?;
            let expected = position as DocId + 1;
            ensure!(
                doc.id == expected,
                "document id {} at parse position {} (expected {}); ids must run sequentially from 1",
                doc.id,
                position,
                expected
            );
            docs.push(doc);
        }
        tracing::info!(documents = docs.len(), "built document collection");
        Ok(Collection { docs })
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        id.checked_sub(1).and_then(|i| self.docs.get(i as usize))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::split_into_records;

    fn records(text: &str) -> Vec<RawRecord> {
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (l.to_string(), i + 1))
            .collect();
        split_into_records(lines)
    }

    fn build(text: &str, options: IndexOptions, stopwords: Option<&StopwordSet>) -> Collection {
        Collection::from_records(&records(text), &options, stopwords).unwrap()
    }

    #[test]
    fn positions_run_across_title_and_abstract() {
        let coll = build(
            ".I 1\n.T\nParsing Programs\n.W\nParsing made practical",
            IndexOptions::default(),
            None,
        );
        let doc = coll.get(1).unwrap();
        assert_eq!(doc.positions("parsing"), Some(&[1, 3][..]));
        assert_eq!(doc.positions("programs"), Some(&[2][..]));
        assert_eq!(doc.positions("practical"), Some(&[5][..]));
        assert_eq!(doc.term_frequency("parsing"), 2);
    }

    #[test]
    fn position_lists_strictly_ascend() {
        let coll = build(
            ".I 1\n.T\nloop loop loop\n.W\nloop again loop",
            IndexOptions::default(),
            None,
        );
        let positions = coll.get(1).unwrap().positions("loop").unwrap();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn symbol_only_tokens_are_skipped_but_consume_no_position() {
        let coll = build(".I 1\n.T\nalpha -- beta", IndexOptions::default(), None);
        let doc = coll.get(1).unwrap();
        assert_eq!(doc.positions("alpha"), Some(&[1][..]));
        assert_eq!(doc.positions("beta"), Some(&[2][..]));
        assert!(doc.positions("").is_none());
    }

    #[test]
    fn full_title_joins_lines_and_trims_leading_whitespace() {
        let coll = build(
            ".I 1\n.T\n   A Multi-Line\n Title Here",
            IndexOptions::default(),
            None,
        );
        assert_eq!(coll.get(1).unwrap().full_title, "A Multi-Line Title Here");
    }

    #[test]
    fn missing_title_yields_empty_full_title() {
        let coll = build(".I 1\n.W\nonly an abstract", IndexOptions::default(), None);
        let doc = coll.get(1).unwrap();
        assert_eq!(doc.full_title, "");
        assert_eq!(doc.positions("abstract"), Some(&[3][..]));
    }

    #[test]
    fn stopword_filtering_keeps_following_entries() {
        // Adjacent stopwords exercise the removed-neighbor pitfall.
        let set = StopwordSet::from_words(["the", "of"]);
        let coll = build(
            ".I 1\n.T\nthe of the analysis of programs",
            IndexOptions { stopwords_on: true, stemming_on: false },
            Some(&set),
        );
        let doc = coll.get(1).unwrap();
        assert!(doc.positions("the").is_none());
        assert!(doc.positions("of").is_none());
        assert_eq!(doc.positions("analysis"), Some(&[4][..]));
        assert_eq!(doc.positions("programs"), Some(&[6][..]));
    }

    #[test]
    fn stemming_merges_morphological_variants() {
        let coll = build(
            ".I 1\n.T\nRunning\n.W\nruns",
            IndexOptions { stopwords_on: false, stemming_on: true },
            None,
        );
        let doc = coll.get(1).unwrap();
        assert_eq!(doc.positions("run"), Some(&[1, 2][..]));
        assert_eq!(doc.term_frequency("run"), 2);
        assert!(doc.positions("running").is_none());
    }

    #[test]
    fn out_of_order_ids_fail_construction() {
        let err =
            Collection::from_records(&records(".I 2\n.T\nFirst"), &IndexOptions::default(), None)
                .unwrap_err();
        assert!(err.to_string().contains("sequentially"));
    }

    #[test]
    fn lookup_by_id_is_one_based() {
        let coll = build(".I 1\n.T\nOne\n.I 2\n.T\nTwo", IndexOptions::default(), None);
        assert_eq!(coll.get(1).unwrap().full_title, "One");
        assert_eq!(coll.get(2).unwrap().full_title, "Two");
        assert!(coll.get(0).is_none());
        assert!(coll.get(3).is_none());
    }
}
