use serde::{Deserialize, Serialize};

/// Words highlighted in the letter view.
pub const DEFAULT_EMPHASIS_PHRASES: &[&str] = &[
    "grateful",
    "strength",
    "devotion",
    "endured",
    "grace",
    "admiration",
    "growth",
    "intention",
    "proud",
    "indebted",
    "emulate",
];

/// A run of display text, highlighted or plain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub emphasized: bool,
}

/// Splits a display line into plain and emphasized spans.
///
/// Matching is ASCII case-insensitive substring search, leftmost first, with phrases tried in
/// list order at each position. Concatenating the span texts gives back `text`.
pub fn split_emphasis(text: &str, phrases: &[&str]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < text.len() {
        let hit = phrases
            .iter()
            .filter(|p| !p.is_empty())
            .find(|p| {
                text.get(i..i + p.len())
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(p))
            });

        match hit {
            Some(phrase) => {
                push_span(&mut spans, &text[plain_start..i], false);
                push_span(&mut spans, &text[i..i + phrase.len()], true);
                i += phrase.len();
                plain_start = i;
            }
            None => {
                i += text[i..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    push_span(&mut spans, &text[plain_start..], false);

    spans
}

fn push_span(spans: &mut Vec<Span>, text: &str, emphasized: bool) {
    if !text.is_empty() {
        spans.push(Span {
            text: text.to_string(),
            emphasized,
        });
    }
}
