use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Immutable set of lowercase stopwords, shared by document-level and
/// index-level filtering.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Load a newline-delimited word list. Blank lines are ignored and
    /// words are lowercased on the way in.
    pub fn load(path: &Path) -> Result<StopwordSet> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading stopword list {}", path.display()))?;
        let set = Self::from_words(text.lines());
        tracing::debug!(words = set.len(), path = %path.display(), "loaded stopword list");
        Ok(set)
    }

    pub fn from_words<I, S>(words: I) -> StopwordSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        StopwordSet { words }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
