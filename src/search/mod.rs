//! Literal, case-insensitive search over a document collection.
//!
//! Each query word is matched against every document on its own; the
//! per-word results are then folded per document under the active
//! [`SearchMode`] and finally rendered with [`render`].
pub mod combine;
pub mod engine;
pub mod highlight;
pub mod matcher;
pub mod span;

pub use combine::SearchMode;
pub use engine::{count_matched, search};
pub use highlight::{HighlightMode, merge_spans, render};
pub use matcher::{LineMatch, SearchResult, search_for};
pub use span::{Span, find_spans, fold_case};
