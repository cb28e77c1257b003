//! Greeting / closing auto-personalization.
//!
//! Two independent line-scan passes over the letter body. Each pass rewrites only text that
//! matches the common shape (greeting alone on the first line; closing word then signer as
//! the last two lines) and otherwise inserts a fresh block. Recognized words are data,
//! see `GREETING_WORDS` and `CLOSING_PHRASES`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::RecipientRecord;
use crate::text::normalize_newlines;

/// Greeting words recognized at the start of the first non-blank line.
pub const GREETING_WORDS: &[&str] = &["dear", "hi", "hello"];

/// Closing phrases recognized as a whole line, optionally followed by a comma.
pub const CLOSING_PHRASES: &[&str] = &["love", "sincerely", "best", "yours truly", "warmly"];

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GreetingStyle {
    #[default]
    Hi,
    Hello,
    Dear,
}

impl GreetingStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            GreetingStyle::Hi => "Hi",
            GreetingStyle::Hello => "Hello",
            GreetingStyle::Dear => "Dear",
        }
    }
}

impl fmt::Display for GreetingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GreetingStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hi" => Ok(GreetingStyle::Hi),
            "hello" => Ok(GreetingStyle::Hello),
            "dear" => Ok(GreetingStyle::Dear),
            other => Err(AppError::Validation(format!(
                "unknown greeting style '{other}' (expected Hi, Hello or Dear)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClosingStyle {
    Love,
    Sincerely,
    #[default]
    Best,
}

impl ClosingStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ClosingStyle::Love => "Love",
            ClosingStyle::Sincerely => "Sincerely",
            ClosingStyle::Best => "Best",
        }
    }
}

impl fmt::Display for ClosingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClosingStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "love" => Ok(ClosingStyle::Love),
            "sincerely" => Ok(ClosingStyle::Sincerely),
            "best" => Ok(ClosingStyle::Best),
            other => Err(AppError::Validation(format!(
                "unknown closing style '{other}' (expected Love, Sincerely or Best)"
            ))),
        }
    }
}

/// Which passes to run and how to phrase them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPersonalizeOptions {
    pub enable_greeting: bool,
    pub greeting_style: GreetingStyle,
    pub enable_closing: bool,
    pub closing_style: ClosingStyle,
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedLetter {
    pub output: String,
    /// Advisory, non-fatal. A pass that warns made no change.
    pub warnings: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public API
// ────────────────────────────────────────────────────────────────────────────

/// Name used in the greeting: `name`, else `firstName lastName`, else `firstName`,
/// else `email`, else empty.
pub fn get_recipient_display_name(record: &RecipientRecord) -> String {
    let field = |key: &str| record.get_str(key).filter(|v| !v.is_empty());

    let full_name = [field("firstName"), field("lastName")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let full_name = Some(full_name.trim().to_string()).filter(|n| !n.is_empty());

    field("name")
        .or(full_name)
        .or_else(|| field("firstName"))
        .or_else(|| field("email"))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Inserts or rewrites the greeting and closing blocks of a letter body.
///
/// Line endings are normalized to `\n`. The greeting pass runs first; the closing pass
/// sees its result.
pub fn auto_personalize_letter(
    body: &str,
    recipient: &RecipientRecord,
    opts: &AutoPersonalizeOptions,
) -> PersonalizedLetter {
    let mut warnings = Vec::new();
    let mut out = normalize_newlines(body);

    if opts.enable_greeting {
        let display_name = get_recipient_display_name(recipient);
        if display_name.is_empty() {
            warnings.push(
                "Greeting enabled, but recipient has no name/firstName/email to greet."
                    .to_string(),
            );
        } else {
            let greeting_line = format!("{} {},", opts.greeting_style, display_name);
            out = apply_greeting(&out, &greeting_line);
        }
    }

    if opts.enable_closing {
        let from = opts.from_name.as_deref().unwrap_or("").trim();
        if from.is_empty() {
            warnings.push("Closing enabled, but From name is empty.".to_string());
        } else {
            out = apply_closing(&out, opts.closing_style, from);
        }
    }

    PersonalizedLetter {
        output: out,
        warnings,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when the line (after leading whitespace) begins with a greeting word followed by
/// a word boundary.
fn starts_with_greeting(line: &str) -> bool {
    let line = line.trim_start();
    GREETING_WORDS.iter().any(|word| {
        line.get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word))
            && !line[word.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// True when the whole line is a closing phrase with an optional trailing comma.
fn is_closing_line(line: &str) -> bool {
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line).trim_end();
    CLOSING_PHRASES
        .iter()
        .any(|phrase| line.eq_ignore_ascii_case(phrase))
}

fn apply_greeting(text: &str, greeting_line: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let Some(first) = lines.iter().position(|l| !is_blank(l)) else {
        return greeting_line.to_string();
    };

    if starts_with_greeting(lines[first]) {
        lines[first] = greeting_line;
        return lines.join("\n");
    }

    format!("{greeting_line}\n\n{}", text.trim_start())
}

fn apply_closing(text: &str, style: ClosingStyle, from: &str) -> String {
    let closing_line = format!("{style},");
    let mut lines: Vec<&str> = text.split('\n').collect();
    let Some(last) = lines.iter().rposition(|l| !is_blank(l)) else {
        return format!("{closing_line}\n{from}\n");
    };

    // Existing closing word + signer pair: overwrite both.
    if last > 0 && is_closing_line(lines[last - 1]) {
        lines[last - 1] = &closing_line;
        lines[last] = from;
        return ensure_trailing_newline(lines.join("\n"));
    }

    // Closing word with no signer after it.
    if is_closing_line(lines[last]) {
        lines[last] = &closing_line;
        lines.insert(last + 1, from);
        return ensure_trailing_newline(lines.join("\n"));
    }

    format!("{}\n\n{closing_line}\n{from}\n", text.trim_end())
}

fn ensure_trailing_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
