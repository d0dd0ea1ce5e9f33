use crate::search::matcher::{LineMatch, SearchResult};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How per-word results for the same document are folded together.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchMode {
    /// Every word must match somewhere in the document.
    #[default]
    And,
    /// Any word matching is enough.
    Or,
}

impl SearchMode {
    /// Folds the result for the next query word into the running aggregate.
    ///
    /// Under AND a zero on either side only resets `acc.matches`; the spans
    /// gathered so far stay in place but are never displayed.
    pub fn fold(self, acc: &mut SearchResult, next: &SearchResult) {
        match self {
            SearchMode::And => {
                if acc.matches > 0 && next.matches > 0 {
                    *acc = acc.combine_with(next);
                } else {
                    acc.matches = 0;
                }
            }
            SearchMode::Or => *acc = acc.combine_with(next),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::And => write!(f, "AND"),
            SearchMode::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(SearchMode::And),
            "OR" => Ok(SearchMode::Or),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

impl SearchResult {
    /// Merges two results for the same document.
    ///
    /// Counts are summed as-is and spans are concatenated without
    /// deduplication, so overlapping hits from different words count twice.
    pub fn combine_with(&self, other: &SearchResult) -> SearchResult {
        let mut title_spans = self.title_spans.clone();
        title_spans.extend_from_slice(&other.title_spans);
        title_spans.sort();

        let mut lines_by_no: BTreeMap<usize, LineMatch> = self
            .line_matches
            .iter()
            .map(|lm| (lm.line_no, lm.clone()))
            .collect();
        for lm in &other.line_matches {
            lines_by_no
                .entry(lm.line_no)
                .and_modify(|existing| existing.spans.extend_from_slice(&lm.spans))
                .or_insert_with(|| lm.clone());
        }

        SearchResult {
            title: self.title.clone(),
            title_spans,
            line_matches: lines_by_no.into_values().collect(),
            matches: self.matches + other.matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::span::Span;

    fn result(title_spans: &[(usize, usize)], lines: Vec<(usize, Vec<(usize, usize)>)>) -> SearchResult {
        let title_spans: Vec<Span> = title_spans.iter().copied().map(Span::from).collect();
        let line_matches: Vec<LineMatch> = lines
            .into_iter()
            .map(|(no, spans)| {
                LineMatch::new(
                    no,
                    format!("line {no}"),
                    spans.into_iter().map(Span::from).collect(),
                )
            })
            .collect();
        let mut r = SearchResult {
            title: "Doc".to_string(),
            title_spans,
            line_matches,
            matches: 0,
        };
        r.matches = r.span_count();
        r
    }

    #[test]
    fn test_combine_sums_and_sorts() {
        let a = result(&[(5, 7)], vec![(3, vec![(0, 2)])]);
        let b = result(&[(1, 3)], vec![(1, vec![(4, 6)]), (3, vec![(8, 9)])]);
        let c = a.combine_with(&b);

        assert_eq!(c.matches, 4);
        assert_eq!(c.title_spans, vec![Span::new(1, 3), Span::new(5, 7)]);
        assert_eq!(c.line_matches.len(), 2);
        assert_eq!(c.line_matches[0].line_no, 1);
        assert_eq!(c.line_matches[1].line_no, 3);
        assert_eq!(c.line_matches[1].spans, vec![Span::new(0, 2), Span::new(8, 9)]);
    }

    #[test]
    fn test_combine_keeps_duplicates() {
        let a = result(&[(0, 2)], vec![]);
        let c = a.combine_with(&a);

        assert_eq!(c.title_spans, vec![Span::new(0, 2), Span::new(0, 2)]);
        assert_eq!(c.matches, 2);
    }

    #[test]
    fn test_combine_does_not_alias_inputs() {
        let a = result(&[], vec![(1, vec![(0, 1)])]);
        let b = result(&[], vec![(1, vec![(2, 3)])]);
        let _ = a.combine_with(&b);

        assert_eq!(a.line_matches[0].spans, vec![Span::new(0, 1)]);
        assert_eq!(b.line_matches[0].spans, vec![Span::new(2, 3)]);
    }

    #[test]
    fn test_and_fold_zeroes_counter_only() {
        let mut acc = result(&[(0, 3)], vec![(2, vec![(1, 4)])]);
        let miss = SearchResult::empty("Doc");
        SearchMode::And.fold(&mut acc, &miss);

        assert_eq!(acc.matches, 0);
        assert_eq!(acc.title_spans, vec![Span::new(0, 3)]);
        assert_eq!(acc.line_matches.len(), 1);
    }

    #[test]
    fn test_and_fold_stays_zero_after_miss() {
        let mut acc = SearchResult::empty("Doc");
        let hit = result(&[(0, 3)], vec![]);
        SearchMode::And.fold(&mut acc, &hit);

        assert_eq!(acc.matches, 0);
        assert!(acc.title_spans.is_empty());
    }

    #[test]
    fn test_or_fold_always_combines() {
        let mut acc = SearchResult::empty("Doc");
        let hit = result(&[(0, 3)], vec![]);
        SearchMode::Or.fold(&mut acc, &hit);

        assert_eq!(acc.matches, 1);
        assert_eq!(acc.title_spans, vec![Span::new(0, 3)]);
    }

    #[test]
    fn test_search_mode_parse() {
        assert_eq!("and".parse::<SearchMode>(), Ok(SearchMode::And));
        assert_eq!("OR".parse::<SearchMode>(), Ok(SearchMode::Or));
        assert!("xor".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::Or.to_string(), "OR");
    }
}
