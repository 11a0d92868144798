//! Single-term lookup against the built index, with latency accounting.

use crate::document::Collection;
use crate::index::InvertedIndex;
use crate::{DocId, Position};
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::{Duration, Instant};

/// One matching document of a lookup.
#[derive(Debug, Clone, Serialize)]
pub struct QueryHit {
    pub doc_id: DocId,
    pub title: String,
    pub frequency: usize,
    pub positions: Vec<Position>,
}

/// Outcome of one lookup. An empty `hits` list is a normal negative
/// result, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub term: String,
    pub hits: Vec<QueryHit>,
    pub took_s: f64,
}

/// Serves lookups over the finished collection and index. Both are
/// read-only here; the only mutable state is the timing accumulator.
pub struct QueryEngine {
    collection: Collection,
    index: InvertedIndex,
    total_query_time: Duration,
    query_count: u64,
}

impl QueryEngine {
    pub fn new(collection: Collection, index: InvertedIndex) -> QueryEngine {
        QueryEngine {
            collection,
            index,
            total_query_time: Duration::ZERO,
            query_count: 0,
        }
    }

    /// Look up an already-normalized term. Every call, hit or miss, is
    /// timed and folded into the running average.
    pub fn lookup(&mut self, term: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let mut hits = Vec::new();
        if let Some(postings) = self.index.postings(term) {
            for &doc_id in postings {
                let doc = self.collection.get(doc_id).with_context(|| {
                    format!("index posting for {term:?} references unknown document {doc_id}")
                })?;
                let positions = doc.positions(term).with_context(|| {
                    format!("document {doc_id} carries no positions for posted term {term:?}")
                })?;
                hits.push(QueryHit {
                    doc_id,
                    title: doc.full_title.clone(),
                    frequency: positions.len(),
                    positions: positions.to_vec(),
                });
            }
        }
        let elapsed = start.elapsed();
        self.total_query_time += elapsed;
        self.query_count += 1;
        tracing::debug!(term, hits = hits.len(), took_s = elapsed.as_secs_f64(), "query served");
        Ok(QueryResult {
            term: term.to_string(),
            hits,
            took_s: elapsed.as_secs_f64(),
        })
    }

    pub fn query_count(&self) -> u64 {
        self.query_count
    }

    /// Mean lookup latency so far; zero before the first query.
    pub fn average_query_time(&self) -> Duration {
        if self.query_count == 0 {
            Duration::ZERO
        } else {
            self.total_query_time / self.query_count as u32
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}
