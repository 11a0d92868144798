//! Record splitting and section extraction for `.I`-marker collections.
//!
//! A collection file is a flat sequence of lines; every record starts with
//! an `.I <integer-id>` line, and each later marker line (`.B`, `.T`, `.W`,
//! `.A`, `.X`, `.N`) opens a section that accumulates the following lines
//! until the next marker or the end of the record.

use crate::DocId;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref ID_MARKER: Regex = Regex::new(r"^\.I\s+(\d+)\s*$").expect("valid regex");
}

/// Line text paired with its 1-based source line number.
pub type NumberedLine = (String, usize);

/// The lines of one document, from its `.I` marker to the next.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub lines: Vec<NumberedLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Identifier,
    Date,
    Title,
    Abstract,
    Authors,
    CrossRef,
    Note,
}

impl SectionKind {
    fn from_line(line: &str) -> Option<SectionKind> {
        match line.get(..2)? {
            ".I" => Some(SectionKind::Identifier),
            ".B" => Some(SectionKind::Date),
            ".T" => Some(SectionKind::Title),
            ".W" => Some(SectionKind::Abstract),
            ".A" => Some(SectionKind::Authors),
            ".X" => Some(SectionKind::CrossRef),
            ".N" => Some(SectionKind::Note),
            _ => None,
        }
    }
}

/// Typed sections of one record. Cross-reference and note sections are
/// recognized during the scan but not retained.
#[derive(Debug, Default)]
pub struct RecordSections {
    pub id: DocId,
    pub starting_line: usize,
    pub title_lines: Vec<String>,
    pub abstract_lines: Vec<String>,
    pub publication_date: Option<String>,
    pub author_lines: Vec<String>,
}

/// Read a collection file into records.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading collection file {}", path.display()))?;
    let lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (line.to_string(), i + 1))
        .collect();
    let records = split_into_records(lines);
    tracing::info!(records = records.len(), path = %path.display(), "parsed collection");
    Ok(records)
}

/// Split numbered lines into records on `.I` marker boundaries. Content
/// before the first marker does not belong to any record and is dropped.
pub fn split_into_records(lines: Vec<NumberedLine>) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut current: Option<RawRecord> = None;
    for line in lines {
        if line.0.starts_with(".I") {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(RawRecord { lines: vec![line] });
        } else if let Some(record) = current.as_mut() {
            record.lines.push(line);
        }
    }
    if let Some(record) = current {
        records.push(record);
    }
    records
}

/// Scan a record's lines into typed sections. Fails when the record does
/// not open with a valid `.I <integer>` marker.
pub fn extract_sections(record: &RawRecord) -> Result<RecordSections> {
    let (first, first_no) = record.lines.first().context("record has no lines")?;
    let captures = ID_MARKER.captures(first).with_context(|| {
        format!("line {first_no}: record does not start with a valid .I marker: {first:?}")
    })?;
    let id: DocId = captures[1]
        .parse()
        .with_context(|| format!("line {first_no}: document id out of range: {first:?}"))?;

    let mut sections = RecordSections {
        id,
        starting_line: *first_no,
        ..Default::default()
    };
    let mut current = SectionKind::Identifier;
    for (text, _) in &record.lines[1..] {
        if let Some(kind) = SectionKind::from_line(text) {
            current = kind;
            continue;
        }
        match current {
            SectionKind::Title => sections.title_lines.push(text.clone()),
            SectionKind::Abstract => sections.abstract_lines.push(text.clone()),
            SectionKind::Date => {
                if sections.publication_date.is_none() {
                    sections.publication_date = Some(text.clone());
                }
            }
            SectionKind::Authors => sections.author_lines.push(text.clone()),
            // Lines after the identifier but before any marker, and the
            // bodies of cross-reference/note sections, are not indexed.
            SectionKind::Identifier | SectionKind::CrossRef | SectionKind::Note => {}
        }
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(text: &str) -> Vec<NumberedLine> {
        text.lines()
            .enumerate()
            .map(|(i, l)| (l.to_string(), i + 1))
            .collect()
    }

    #[test]
    fn splits_on_identifier_markers() {
        let records = split_into_records(numbered(".I 1\n.T\nOne\n.I 2\n.T\nTwo"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].lines.len(), 3);
        assert_eq!(records[1].lines[0], (".I 2".to_string(), 4));
    }

    #[test]
    fn discards_content_before_first_marker() {
        let records = split_into_records(numbered("stray header\n.I 1\n.T\nOnly"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lines[0].0, ".I 1");
    }

    #[test]
    fn extracts_typed_sections() {
        let records = split_into_records(numbered(
            ".I 7\n.B\nMarch 1961\n.T\nA Title\nContinued\n.W\nBody text\n.A\nPerlis, A. J.\n.N\nnote line",
        ));
        let sections = extract_sections(&records[0]).unwrap();
        assert_eq!(sections.id, 7);
        assert_eq!(sections.starting_line, 1);
        assert_eq!(sections.title_lines, vec!["A Title", "Continued"]);
        assert_eq!(sections.abstract_lines, vec!["Body text"]);
        assert_eq!(sections.publication_date.as_deref(), Some("March 1961"));
        assert_eq!(sections.author_lines, vec!["Perlis, A. J."]);
    }

    #[test]
    fn empty_title_section_is_not_an_error() {
        let records = split_into_records(numbered(".I 1\n.T\n.W\nabstract only"));
        let sections = extract_sections(&records[0]).unwrap();
        assert!(sections.title_lines.is_empty());
        assert_eq!(sections.abstract_lines, vec!["abstract only"]);
    }

    #[test]
    fn rejects_malformed_identifier() {
        let records = split_into_records(numbered(".I seven\n.T\nBad"));
        let err = extract_sections(&records[0]).unwrap_err();
        assert!(err.to_string().contains(".I marker"));
    }
}
