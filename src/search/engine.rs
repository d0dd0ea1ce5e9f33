use crate::corpus::Document;
use crate::search::combine::SearchMode;
use crate::search::matcher::{SearchResult, search_for};
use log::debug;
use rayon::prelude::*;

/// Runs a whitespace-separated query against every document.
///
/// Returns one result per document in collection order, unfiltered. A query
/// without words yields an empty vector rather than a zero result per
/// document.
pub fn search(documents: &[Document], query: &str, mode: SearchMode) -> Vec<SearchResult> {
    let words: Vec<&str> = query.split_whitespace().collect();
    debug!("Searching {} documents for {:?} ({mode})", documents.len(), words);

    let mut combined: Vec<SearchResult> = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let results = match_word(documents, word);
        if i == 0 {
            combined = results;
            continue;
        }
        for (acc, next) in combined.iter_mut().zip(&results) {
            mode.fold(acc, next);
        }
    }

    combined
}

/// Matches one word against all documents, keeping collection order.
fn match_word(documents: &[Document], word: &str) -> Vec<SearchResult> {
    documents
        .par_iter()
        .map(|document| search_for(document, word))
        .collect()
}

/// Number of results whose counter is non-zero.
pub fn count_matched(results: &[SearchResult]) -> usize {
    results.iter().filter(|r| r.is_match()).count()
}
