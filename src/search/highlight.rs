use crate::search::span::Span;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const DEFAULT_START: &str = "\x1b[43m\x1b[30m";
const GREEN_START: &str = "\x1b[1;92m";
/// Emitted after every highlighted segment.
pub const RESET: &str = "\x1b[0m";

/// Visual treatment for matched text.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HighlightMode {
    /// Dark text on a yellow background.
    #[default]
    Default,
    /// Bold bright-green text.
    Green,
}

impl HighlightMode {
    pub fn start_marker(self) -> &'static str {
        match self {
            HighlightMode::Default => DEFAULT_START,
            HighlightMode::Green => GREEN_START,
        }
    }
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightMode::Default => write!(f, "DEFAULT"),
            HighlightMode::Green => write!(f, "GREEN"),
        }
    }
}

impl FromStr for HighlightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEFAULT" => Ok(HighlightMode::Default),
            "GREEN" => Ok(HighlightMode::Green),
            other => Err(format!("unknown highlight mode: {other}")),
        }
    }
}

/// Sorts spans and collapses those that overlap or touch.
pub fn merge_spans(spans: &[Span]) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort();

    let mut iter = sorted.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for span in iter {
        if span.start <= current.end {
            current.end = current.end.max(span.end);
        } else {
            merged.push(current);
            current = span;
        }
    }
    merged.push(current);

    merged
}

/// Wraps every merged span of `text` in the markers for `mode`.
///
/// Span offsets are character offsets; out-of-range ends are clamped to the
/// text length.
pub fn render(text: &str, spans: &[Span], mode: HighlightMode) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let merged = merge_spans(spans);
    let byte_at = char_to_byte_offsets(text);
    let to_byte = |char_idx: usize| byte_at[char_idx.min(byte_at.len() - 1)];

    let mut out = String::with_capacity(text.len() + merged.len() * 16);
    let mut cursor = 0;
    for span in merged {
        let start = to_byte(span.start).max(cursor);
        let end = to_byte(span.end);
        if start >= end {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(mode.start_marker());
        out.push_str(&text[start..end]);
        out.push_str(RESET);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Byte offset of every character boundary, including the end of the text.
fn char_to_byte_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}
