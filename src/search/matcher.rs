use crate::corpus::Document;
use crate::search::span::{Span, find_spans, fold_case};
use serde::Serialize;

/// Match evidence for one line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// 1-based line number.
    pub line_no: usize,
    /// The line as it appears in the document, case preserved.
    pub text: String,
    pub spans: Vec<Span>,
}

impl LineMatch {
    pub fn new(line_no: usize, text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            line_no,
            text: text.into(),
            spans,
        }
    }
}

/// Aggregated match evidence for one document.
///
/// `matches` gates display. For a single word it equals the number of title
/// and line spans; after folding several words it is a running sum that the
/// AND policy may reset to zero without touching the spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub title_spans: Vec<Span>,
    pub line_matches: Vec<LineMatch>,
    pub matches: usize,
}

impl SearchResult {
    /// A result with no evidence at all.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_spans: Vec::new(),
            line_matches: Vec::new(),
            matches: 0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matches > 0
    }

    /// Number of spans actually held, independent of the `matches` counter.
    pub fn span_count(&self) -> usize {
        self.title_spans.len()
            + self
                .line_matches
                .iter()
                .map(|lm| lm.spans.len())
                .sum::<usize>()
    }
}

/// Matches a single query word against a document's title and lines,
/// ignoring case.
pub fn search_for(document: &Document, word: &str) -> SearchResult {
    let pattern = fold_case(word);
    let title_spans = find_spans(&fold_case(&document.title), &pattern);

    let line_matches: Vec<LineMatch> = document
        .lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let spans = find_spans(&fold_case(line), &pattern);
            (!spans.is_empty()).then(|| LineMatch::new(idx + 1, line.as_str(), spans))
        })
        .collect();

    let mut result = SearchResult {
        title: document.title.clone(),
        title_spans,
        line_matches,
        matches: 0,
    };
    result.matches = result.span_count();
    result
}
