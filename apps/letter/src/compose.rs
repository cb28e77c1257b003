//! End-to-end composition: template -> personalized text -> wrapped, emphasized lines.
//!
//! This is the only layer that sees both engines. It also owns the file I/O and logging
//! around them; the engines themselves stay pure.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::layout::{split_emphasis, wrap_letter_to_measured_lines, Span, TextMeasurer};
use crate::models::{Line, RecipientRecord};
use crate::personalization::{
    auto_personalize_letter, get_recipient_display_name, parse_recipients_from_text,
    render_template, slugify_filename, AutoPersonalizeOptions,
};

/// Letter used when no `LETTER_PATH` is configured.
pub const SAMPLE_LETTER: &str = include_str!("../assets/letter.txt");

/// A wrapped line plus its emphasis spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayLine {
    #[serde(flatten)]
    pub line: Line,
    pub spans: Vec<Span>,
}

/// One personalized, laid-out letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedLetter {
    /// Suggested download name, e.g. `robbie.txt`.
    pub filename: String,
    pub text: String,
    pub missing_keys: Vec<String>,
    pub warnings: Vec<String>,
    pub lines: Vec<DisplayLine>,
}

/// Everything the binary prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionReport {
    pub headers: Vec<String>,
    /// Warnings from recipient parsing; per-letter warnings live on each letter.
    pub warnings: Vec<String>,
    pub letters: Vec<ComposedLetter>,
}

/// Reads a UTF-8 text file.
pub fn load_text(path: &Path) -> Result<String, AppError> {
    debug!(path = %path.display(), "Reading text file");
    Ok(std::fs::read_to_string(path)?)
}

/// Pretty-printed JSON for the report.
pub fn report_to_json(report: &CompositionReport) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Personalizes and wraps one letter for one recipient.
pub fn compose_letter<M>(
    template: &str,
    recipient: &RecipientRecord,
    options: &AutoPersonalizeOptions,
    measurer: &M,
    max_width_px: f32,
    emphasis: &[&str],
) -> ComposedLetter
where
    M: TextMeasurer + ?Sized,
{
    let rendered = render_template(template, recipient);
    let personalized = auto_personalize_letter(&rendered.output, recipient, options);

    let lines = wrap_letter_to_measured_lines(&personalized.output, max_width_px, measurer)
        .into_iter()
        .map(|line| {
            let spans = if line.is_empty {
                Vec::new()
            } else {
                split_emphasis(&line.text, emphasis)
            };
            DisplayLine { line, spans }
        })
        .collect();

    let display_name = get_recipient_display_name(recipient);
    let filename = format!("{}.txt", slugify_filename(&display_name));

    ComposedLetter {
        filename,
        text: personalized.output,
        missing_keys: rendered.missing_keys,
        warnings: personalized.warnings,
        lines,
    }
}

/// Composes one letter per recipient parsed from `recipients_text`, or a single letter for
/// an empty record when `recipients_text` is `None`.
pub fn compose_letters<M>(
    template: &str,
    recipients_text: Option<&str>,
    options: &AutoPersonalizeOptions,
    measurer: &M,
    max_width_px: f32,
    emphasis: &[&str],
) -> CompositionReport
where
    M: TextMeasurer + ?Sized,
{
    let (recipients, headers, warnings) = match recipients_text {
        Some(text) => {
            let parsed = parse_recipients_from_text(text);
            (parsed.recipients, parsed.headers, parsed.warnings)
        }
        None => (vec![RecipientRecord::new()], Vec::new(), Vec::new()),
    };

    for w in &warnings {
        warn!(warning = %w, "Recipient parsing");
    }

    let letters: Vec<ComposedLetter> = recipients
        .iter()
        .map(|r| compose_letter(template, r, options, measurer, max_width_px, emphasis))
        .collect();

    for letter in &letters {
        if !letter.missing_keys.is_empty() {
            warn!(
                filename = %letter.filename,
                missing = ?letter.missing_keys,
                "Template placeholders without values"
            );
        }
        for w in &letter.warnings {
            warn!(filename = %letter.filename, warning = %w, "Personalization");
        }
    }

    debug!(
        letters = letters.len(),
        width_px = max_width_px,
        "Composition finished"
    );

    CompositionReport {
        headers,
        warnings,
        letters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_view_config, FontFamily, DEFAULT_EMPHASIS_PHRASES};
    use crate::personalization::{ClosingStyle, GreetingStyle};
    use std::io::Write;

    fn fixed(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    fn options() -> AutoPersonalizeOptions {
        AutoPersonalizeOptions {
            enable_greeting: true,
            greeting_style: GreetingStyle::Dear,
            enable_closing: true,
            closing_style: ClosingStyle::Love,
            from_name: Some("Ethan".to_string()),
        }
    }

    #[test]
    fn test_compose_letter_runs_all_stages() {
        let recipient = RecipientRecord::from_pairs([("name", "Robbie"), ("city", "Seattle")]);
        let letter = compose_letter(
            "Hi there,\nSo grateful for {{city}} and {{ team | everyone }}.",
            &recipient,
            &options(),
            &fixed,
            10_000.0,
            DEFAULT_EMPHASIS_PHRASES,
        );
        assert_eq!(
            letter.text,
            "Dear Robbie,\nSo grateful for Seattle and everyone.\n\nLove,\nEthan\n"
        );
        assert_eq!(letter.filename, "robbie.txt");
        assert!(letter.missing_keys.is_empty());
        assert!(letter.warnings.is_empty());

        let texts: Vec<&str> = letter.lines.iter().map(|l| l.line.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Dear Robbie,",
                "So grateful for Seattle and everyone.",
                "",
                "Love,",
                "Ethan",
                ""
            ]
        );
        assert!(letter.lines[1].spans.iter().any(|s| s.emphasized && s.text == "grateful"));
        assert!(letter.lines[2].spans.is_empty());
    }

    #[test]
    fn test_compose_letters_one_per_recipient() {
        let report = compose_letters(
            "Hello {{name}}, from {{ sender | me }}.",
            Some("name,email\nAda,ada@x.com\nGrace Hopper,g@x.com\n"),
            &AutoPersonalizeOptions::default(),
            &fixed,
            10_000.0,
            DEFAULT_EMPHASIS_PHRASES,
        );
        assert_eq!(report.headers, vec!["name", "email"]);
        assert!(report.warnings.is_empty());
        assert_eq!(report.letters.len(), 2);
        assert_eq!(report.letters[1].text, "Hello Grace Hopper, from me.");
        assert_eq!(report.letters[1].filename, "grace-hopper.txt");
    }

    #[test]
    fn test_compose_letters_without_recipients_uses_empty_record() {
        let report = compose_letters(
            "Hi {{name}}",
            None,
            &options(),
            &fixed,
            10_000.0,
            &[],
        );
        assert_eq!(report.letters.len(), 1);
        let letter = &report.letters[0];
        assert_eq!(letter.missing_keys, vec!["name".to_string()]);
        assert_eq!(letter.warnings.len(), 1, "greeting should warn about missing name");
        assert_eq!(letter.filename, "letter.txt");
    }

    #[test]
    fn test_compose_letters_surfaces_parse_warnings() {
        let report = compose_letters(
            "x",
            Some("name\n"),
            &AutoPersonalizeOptions::default(),
            &fixed,
            100.0,
            &[],
        );
        assert!(report.letters.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_sample_letter_wraps_with_builtin_font() {
        let view = default_view_config(FontFamily::Lora);
        let letter = compose_letter(
            SAMPLE_LETTER,
            &RecipientRecord::from_pairs([("firstName", "Robbie")]),
            &AutoPersonalizeOptions::default(),
            &view.measurer(),
            view.wrap_width_px(),
            DEFAULT_EMPHASIS_PHRASES,
        );
        assert!(letter.lines.len() > 10);
        assert!(letter.text.contains("Robbie"));
        assert!(letter.lines.iter().any(|l| l.line.is_empty));
    }

    #[test]
    fn test_report_serializes_flattened_lines() {
        let report = compose_letters("a b", None, &AutoPersonalizeOptions::default(), &fixed, 100.0, &[]);
        let json: serde_json::Value =
            serde_json::from_str(&report_to_json(&report).unwrap()).unwrap();
        let line = &json["letters"][0]["lines"][0];
        assert_eq!(line["id"], "l-0");
        assert_eq!(line["text"], "a b");
        assert_eq!(line["is_empty"], false);
    }

    #[test]
    fn test_load_text_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Dear {{{{name}}}},\nHello").unwrap();
        let text = load_text(file.path()).unwrap();
        assert_eq!(text, "Dear {{name}},\nHello");
    }

    #[test]
    fn test_load_text_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
