use crate::{stemmer, IndexOptions};
use unicode_normalization::UnicodeNormalization;

/// Normalize one whitespace-delimited token: NFKC fold, strip
/// non-alphanumeric characters, lowercase. Returns `None` when nothing
/// survives stripping (such tokens are not indexable terms).
pub fn normalize_token(raw: &str) -> Option<String> {
    let term: String = raw
        .nfkc()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}

/// Normalized terms of one source line, in order of appearance.
pub fn line_terms(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().filter_map(normalize_token)
}

/// Normalize a query term the same way the interactive loop's input is
/// prepared: lowercase, then stem when stemming is enabled. The lookup
/// path itself performs no normalization.
pub fn normalize_query_term(raw: &str, options: &IndexOptions) -> String {
    let term = raw.trim().to_lowercase();
    if options.stemming_on {
        stemmer::stem(&term)
    } else {
        term
    }
}
