use crate::search::{HighlightMode, SearchMode, SearchResult, Span, count_matched, render};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// How matched spans are drawn; `None` prints plain text.
pub type HighlightStyle = Option<HighlightMode>;

pub fn format_summary(query: &str, matched: usize, total: usize, elapsed: Option<Duration>) -> String {
    let mut line = format!("{matched} out of {total} documents contain \"{query}\".");
    if let Some(elapsed) = elapsed {
        line.push_str(&format!(
            " Your query took {:.2}ms.",
            elapsed.as_secs_f64() * 1000.0
        ));
    }
    line
}

fn highlighted(text: &str, spans: &[Span], style: HighlightStyle) -> String {
    match style {
        Some(mode) => render(text, spans, mode),
        None => text.to_string(),
    }
}

/// Header and matching lines for one document, starting with a blank line.
pub fn format_result(idx: usize, total: usize, result: &SearchResult, style: HighlightStyle) -> String {
    let mut block = format!(
        "\n[{idx}/{total}] {}",
        highlighted(&result.title, &result.title_spans, style)
    );
    for lm in &result.line_matches {
        block.push_str(&format!(
            "\n  [{:2}] {}",
            lm.line_no,
            highlighted(&lm.text, &lm.spans, style)
        ));
    }
    block
}

/// Writes the summary line followed by every matched document.
pub fn print_results<W: Write>(
    out: &mut W,
    query: &str,
    results: &[SearchResult],
    style: HighlightStyle,
    elapsed: Option<Duration>,
) -> io::Result<()> {
    let total = results.len();
    writeln!(
        out,
        "{}",
        format_summary(query, count_matched(results), total, elapsed)
    )?;

    for (i, result) in results.iter().filter(|r| r.is_match()).enumerate() {
        writeln!(out, "{}", format_result(i + 1, total, result, style))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub query: &'a str,
    pub mode: SearchMode,
    pub matched: usize,
    pub total: usize,
    pub results: Vec<&'a SearchResult>,
}

impl<'a> JsonReport<'a> {
    pub fn new(query: &'a str, mode: SearchMode, results: &'a [SearchResult]) -> Self {
        let matched: Vec<&SearchResult> = results.iter().filter(|r| r.is_match()).collect();
        Self {
            query,
            mode,
            matched: matched.len(),
            total: results.len(),
            results: matched,
        }
    }
}

pub fn print_json<W: Write>(
    out: &mut W,
    query: &str,
    mode: SearchMode,
    results: &[SearchResult],
) -> io::Result<()> {
    let report = JsonReport::new(query, mode, results);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
