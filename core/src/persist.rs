//! Text serialization of the dictionary and postings files.
//!
//! The nth term block of the dictionary file corresponds to the nth term
//! block of the postings file; both iterate the index in term order and
//! are written in a single pass each.

use crate::document::Collection;
use crate::index::InvertedIndex;
use crate::Position;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `Term:` / `Document frequency:` blocks in term order.
pub fn write_dictionary(index: &InvertedIndex, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating dictionary file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for (term, postings) in index.terms() {
        writeln!(out, "Term: {term}")?;
        writeln!(out, "Document frequency: {}", postings.len())?;
    }
    out.flush()?;
    tracing::info!(terms = index.num_terms(), path = %path.display(), "wrote dictionary file");
    Ok(())
}

/// Write per-term posting blocks: document id, in-document frequency, and
/// the ordered position list. A posting that cannot be resolved against
/// the collection is a data-integrity error.
pub fn write_postings(index: &InvertedIndex, collection: &Collection, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating postings file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for (term, postings) in index.terms() {
        writeln!(out, "Term: {term}")?;
        for &doc_id in postings {
            let doc = collection.get(doc_id).with_context(|| {
                format!("posting for {term:?} references unknown document {doc_id}")
            })?;
            let positions = doc.positions(term).with_context(|| {
                format!("document {doc_id} carries no positions for posted term {term:?}")
            })?;
            writeln!(out, "Document ID: {doc_id}")?;
            writeln!(out, "Frequency: {}", positions.len())?;
            writeln!(out, "Position(s): {}", join_positions(positions))?;
        }
    }
    out.flush()?;
    tracing::info!(terms = index.num_terms(), path = %path.display(), "wrote postings file");
    Ok(())
}

fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
