use serde::Serialize;

/// Half-open `[start, end)` interval of character offsets into a title or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "empty span {start}..{end}");
        Self { start, end }
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Lowercases `text` one character at a time.
///
/// Characters whose lowercase form expands to several characters are kept
/// as they are, so character offsets into the folded string are valid
/// offsets into the original one. A capital sigma that ends a word folds to
/// the final form `ς`.
pub fn fold_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c == 'Σ' && ends_word(&chars, i) {
                return 'ς';
            }
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

// Preceded by a cased letter and not followed by one.
fn ends_word(chars: &[char], i: usize) -> bool {
    let after_letter = i > 0 && is_cased(chars[i - 1]);
    let before_letter = chars.get(i + 1).is_some_and(|&c| is_cased(c));
    after_letter && !before_letter
}

/// Finds every occurrence of `pattern` in `text`, overlapping ones included.
///
/// Comparison is exact; callers fold both sides first for case-insensitive
/// matching. An empty pattern never matches.
pub fn find_spans(text: &str, pattern: &str) -> Vec<Span> {
    if pattern.is_empty() {
        return Vec::new();
    }

    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern.as_slice())
        .map(|(i, _)| Span::new(i, i + pattern.len()))
        .collect()
}
