//! Placeholder extraction and substitution for `{{ key }}` / `{{ key | default }}` templates.
//!
//! A placeholder is `{{`, a non-empty run of characters other than `}`, then `}}`.
//! The inner text is trimmed and split on the first `|` only; everything after it,
//! further bars included, is the default value.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::RecipientRecord;

/// A placeholder found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Exact matched text, braces included.
    pub raw: String,
    /// Trimmed dot path, e.g. `person.firstName`.
    pub key: String,
    pub default_value: Option<String>,
}

/// Result of rendering a template against one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTemplate {
    pub output: String,
    /// Keys with no value and no usable default, deduplicated and sorted.
    pub missing_keys: Vec<String>,
}

/// Lists each distinct `(key, default)` pair in order of first appearance.
///
/// Placeholders whose key is empty (`{{ | foo }}`, `{{ }}`) are skipped. A missing default
/// and an empty default count as the same pair.
pub fn extract_placeholders(template: &str) -> Vec<Placeholder> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut placeholders = Vec::new();

    for m in scan(template) {
        let Some((key, default_value)) = split_inner(m.inner) else {
            continue;
        };
        let signature = (key.to_string(), default_value.unwrap_or("").to_string());
        if !seen.insert(signature) {
            continue;
        }
        placeholders.push(Placeholder {
            raw: m.raw.to_string(),
            key: key.to_string(),
            default_value: default_value.map(str::to_string),
        });
    }

    placeholders
}

/// Substitutes every placeholder occurrence independently.
///
/// Resolution order: the trimmed record value if non-empty, then the trimmed default if
/// non-empty, otherwise `{{key}}` is left in the output and the key reported as missing.
/// Malformed placeholders (empty inner text or empty key) render as nothing.
pub fn render_template(template: &str, recipient: &RecipientRecord) -> RenderedTemplate {
    let mut missing: BTreeSet<String> = BTreeSet::new();
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for m in scan(template) {
        output.push_str(&template[last..m.start]);
        last = m.end;

        let Some((key, default_value)) = split_inner(m.inner) else {
            continue;
        };

        let value = recipient.lookup(key).unwrap_or_default();
        let value = value.trim();
        if !value.is_empty() {
            output.push_str(value);
            continue;
        }

        match default_value {
            Some(d) if !d.is_empty() => output.push_str(d),
            _ => {
                missing.insert(key.to_string());
                output.push_str("{{");
                output.push_str(key);
                output.push_str("}}");
            }
        }
    }
    output.push_str(&template[last..]);

    RenderedTemplate {
        output,
        missing_keys: missing.into_iter().collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scanner
// ────────────────────────────────────────────────────────────────────────────

struct RawMatch<'a> {
    start: usize,
    end: usize,
    raw: &'a str,
    inner: &'a str,
}

/// Finds non-overlapping placeholder matches, left to right.
fn scan(template: &str) -> Vec<RawMatch<'_>> {
    let bytes = template.as_bytes();
    let mut matches = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'{' || bytes[i + 1] != b'{' {
            i += 1;
            continue;
        }
        let inner_start = i + 2;
        let mut k = inner_start;
        while k < bytes.len() && bytes[k] != b'}' {
            k += 1;
        }
        // Braces are ASCII, so every index used for slicing is a char boundary.
        if k > inner_start && bytes.get(k + 1) == Some(&b'}') {
            matches.push(RawMatch {
                start: i,
                end: k + 2,
                raw: &template[i..k + 2],
                inner: &template[inner_start..k],
            });
            i = k + 2;
        } else {
            i += 1;
        }
    }

    matches
}

/// Splits trimmed inner text into `(key, default)`. `None` when the key is empty.
fn split_inner(inner: &str) -> Option<(&str, Option<&str>)> {
    let inner = inner.trim();
    if inner.is_empty() {
        return None;
    }
    let (key, default_value) = match inner.split_once('|') {
        Some((k, d)) => (k.trim(), Some(d.trim())),
        None => (inner, None),
    };
    if key.is_empty() {
        return None;
    }
    Some((key, default_value))
}
