//! Measured line wrapping with hyphen-aware word splitting and widow control.
//!
//! # Algorithm
//! 1. Normalize line endings; every source line is a paragraph. A blank source line becomes
//!    exactly one empty `Line`.
//! 2. Words wider than the max width are split at hyphens (hyphen kept on all but the last
//!    piece). Words without a hyphen may overflow.
//! 3. Greedy packing: append `" " + word` while the measured line still fits.
//! 4. Widow control: pull words down from the second-to-last line while the last line is
//!    short and the previous one is long, as long as both still fit.
//!
//! The engine never renders anything itself; width comes from an injected `TextMeasurer`.
//! Identical (text, width, measurer) inputs always produce identical output.

use crate::models::Line;
use crate::text::normalize_newlines;

/// Widow control kicks in while the last line has fewer words than this...
pub const MIN_LAST_LINE_WORDS: usize = 4;
/// ...and the line before it has more words than this.
pub const MIN_PREV_LINE_WORDS: usize = 5;

/// Width of a string in the active font. Must be deterministic and side-effect free.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Wraps a whole letter into display lines with ids `l-0`, `l-1`, ... in source order.
pub fn wrap_letter_to_measured_lines<M>(letter: &str, max_width_px: f32, measure: &M) -> Vec<Line>
where
    M: TextMeasurer + ?Sized,
{
    let normalized = normalize_newlines(letter);
    let mut out: Vec<Line> = Vec::new();

    for raw in normalized.split('\n') {
        if raw.trim().is_empty() {
            out.push(Line::new(out.len(), String::new()));
            continue;
        }
        for text in wrap_paragraph_to_measured_lines(raw, max_width_px, measure) {
            out.push(Line::new(out.len(), text));
        }
    }

    out
}

/// Wraps a single paragraph. A blank paragraph yields one empty string.
pub fn wrap_paragraph_to_measured_lines<M>(
    paragraph: &str,
    max_width_px: f32,
    measure: &M,
) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    let trimmed = paragraph.trim();
    if trimmed.is_empty() {
        return vec![String::new()];
    }

    let mut words: Vec<String> = Vec::new();
    for w in trimmed.split_whitespace() {
        if measure.measure(w) <= max_width_px {
            words.push(w.to_string());
        } else {
            words.extend(split_word_at_hyphen_to_fit(w, max_width_px, measure));
        }
    }

    let mut lines = pack_greedy(&words, max_width_px, measure);
    balance_widow(&mut lines, max_width_px, measure);
    lines
}

/// Breaks an overflowing word at hyphens into the fewest pieces that fit.
///
/// A word without a hyphen comes back whole. A single hyphen-delimited segment that is
/// itself too wide stays as one overflowing piece.
pub fn split_word_at_hyphen_to_fit<M>(word: &str, max_width_px: f32, measure: &M) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    if !word.contains('-') {
        return vec![word.to_string()];
    }

    let parts: Vec<&str> = word.split('-').collect();
    let last = parts.len() - 1;
    let mut out = Vec::new();
    let mut cur = String::new();

    for (i, piece) in parts.iter().enumerate() {
        let with_hyphen = if i < last {
            format!("{piece}-")
        } else {
            piece.to_string()
        };
        let next = format!("{cur}{with_hyphen}");
        if measure.measure(&next) <= max_width_px {
            cur = next;
        } else {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            cur = with_hyphen;
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }

    out
}

fn pack_greedy<M>(words: &[String], max_width_px: f32, measure: &M) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    let mut lines = Vec::new();
    let mut cur = String::new();

    for w in words {
        if cur.is_empty() {
            cur.push_str(w);
            continue;
        }
        let candidate = format!("{cur} {w}");
        if measure.measure(&candidate) <= max_width_px {
            cur = candidate;
        } else {
            lines.push(std::mem::replace(&mut cur, w.clone()));
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }

    lines
}

fn balance_widow<M>(lines: &mut [String], max_width_px: f32, measure: &M)
where
    M: TextMeasurer + ?Sized,
{
    let n = lines.len();
    if n < 2 {
        return;
    }
    let (prev_idx, last_idx) = (n - 2, n - 1);

    loop {
        let mut last_words: Vec<&str> = lines[last_idx].split_whitespace().collect();
        let mut prev_words: Vec<&str> = lines[prev_idx].split_whitespace().collect();

        let last_too_short = !last_words.is_empty() && last_words.len() < MIN_LAST_LINE_WORDS;
        if !last_too_short || prev_words.len() <= MIN_PREV_LINE_WORDS {
            break;
        }

        let Some(moved) = prev_words.pop() else {
            break;
        };
        last_words.insert(0, moved);

        let new_prev = prev_words.join(" ");
        let new_last = last_words.join(" ");
        if measure.measure(&new_prev) > max_width_px || measure.measure(&new_last) > max_width_px
        {
            break;
        }

        lines[prev_idx] = new_prev;
        lines[last_idx] = new_last;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{default_view_config, FontFamily};

    /// 10px per character, spaces included.
    fn fixed(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    // ── paragraphs and ids ──────────────────────────────────────────────────

    #[test]
    fn test_blank_lines_become_single_empty_lines() {
        let lines = wrap_letter_to_measured_lines("Dear Sam,\r\n\r\n  \nBye", 1000.0, &fixed);
        assert_eq!(texts(&lines), vec!["Dear Sam,", "", "", "Bye"]);
        assert!(lines[1].is_empty && lines[2].is_empty);
        assert!(!lines[0].is_empty && !lines[3].is_empty);
    }

    #[test]
    fn test_ids_are_sequential_and_unique() {
        let lines = wrap_letter_to_measured_lines("aaa bbb ccc\n\nddd", 30.0, &fixed);
        let ids: Vec<&str> = lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["l-0", "l-1", "l-2", "l-3", "l-4"]);
    }

    #[test]
    fn test_empty_letter_is_one_empty_line() {
        let lines = wrap_letter_to_measured_lines("", 100.0, &fixed);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty);
    }

    #[test]
    fn test_blank_paragraph_yields_empty_string() {
        assert_eq!(wrap_paragraph_to_measured_lines("   ", 50.0, &fixed), vec![String::new()]);
    }

    // ── greedy packing ──────────────────────────────────────────────────────

    #[test]
    fn test_greedy_packing_respects_width() {
        // width 110 → 11 chars per line
        let lines = wrap_paragraph_to_measured_lines("one two three four five", 110.0, &fixed);
        assert_eq!(lines, vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        let lines = wrap_paragraph_to_measured_lines("  a \t b   c  ", 1000.0, &fixed);
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn test_exact_fit_is_allowed() {
        let lines = wrap_paragraph_to_measured_lines("abcd efgh", 90.0, &fixed);
        assert_eq!(lines, vec!["abcd efgh"]);
    }

    // ── hyphen splitting ────────────────────────────────────────────────────

    #[test]
    fn test_split_word_at_hyphen_keeps_hyphens() {
        let pieces = split_word_at_hyphen_to_fit("well-known-long-word", 100.0, &fixed);
        assert_eq!(pieces, vec!["well-", "known-", "long-word"]);
    }

    #[test]
    fn test_split_word_without_hyphen_is_whole() {
        let pieces = split_word_at_hyphen_to_fit("extraordinarily", 50.0, &fixed);
        assert_eq!(pieces, vec!["extraordinarily"]);
    }

    #[test]
    fn test_split_word_trailing_hyphen_drops_empty_piece() {
        let pieces = split_word_at_hyphen_to_fit("abcdef-", 60.0, &fixed);
        assert_eq!(pieces, vec!["abcdef-"]);
    }

    #[test]
    fn test_overflowing_word_is_kept_on_its_own_line() {
        let lines = wrap_paragraph_to_measured_lines("a supercalifragilistic b", 80.0, &fixed);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_hyphenated_word_is_split_in_paragraph() {
        let lines =
            wrap_paragraph_to_measured_lines("less technology-focused life", 110.0, &fixed);
        assert_eq!(lines, vec!["less", "technology-", "focused", "life"]);
    }

    // ── widow control ───────────────────────────────────────────────────────

    #[test]
    fn test_widow_pulls_word_down() {
        // 6 one-char words fit in 11 chars; "g" alone would be a widow.
        let lines = wrap_paragraph_to_measured_lines("a b c d e f g", 110.0, &fixed);
        assert_eq!(lines, vec!["a b c d e", "f g"]);
    }

    #[test]
    fn test_widow_moves_multiple_words() {
        // "k" alone; words keep moving down until the last line has 4 words.
        let lines = wrap_paragraph_to_measured_lines("a b c d e f g h i j k", 190.0, &fixed);
        assert_eq!(lines, vec!["a b c d e f g", "h i j k"]);
    }

    #[test]
    fn test_widow_stops_when_prev_line_too_short() {
        // previous line has exactly 5 words, so nothing moves
        let lines = wrap_paragraph_to_measured_lines("a b c d e ffffff", 90.0, &fixed);
        assert_eq!(lines, vec!["a b c d e", "ffffff"]);
    }

    #[test]
    fn test_widow_stops_when_move_would_overflow() {
        let lines =
            wrap_paragraph_to_measured_lines("a b c d e f gggggggggg", 110.0, &fixed);
        assert_eq!(lines, vec!["a b c d e f", "gggggggggg"]);
    }

    #[test]
    fn test_widow_leaves_long_last_line() {
        let lines = wrap_paragraph_to_measured_lines("a b c d e f g h i j", 110.0, &fixed);
        assert_eq!(lines, vec!["a b c d e f", "g h i j"]);
    }

    // ── invariants ──────────────────────────────────────────────────────────

    #[test]
    fn test_every_line_fits_or_is_single_overflowing_word() {
        let text = "I\u{2019}m grateful and glad that Berkeley has brought me one of my most \
                    unexpected friendships\u{2014}and a decidedly-long-hyphenated-compound \
                    plus antidisestablishmentarianism for good measure.\n\nBye.";
        let font = default_view_config(FontFamily::Lora).measurer();
        for width in [60.0_f32, 150.0, 320.0, 535.0] {
            for line in wrap_letter_to_measured_lines(text, width, &font) {
                let fits = font.measure(&line.text) <= width;
                let single_word = line.text.split_whitespace().count() <= 1;
                assert!(fits || single_word, "line {:?} overflows {width}", line.text);
            }
        }
    }

    #[test]
    fn test_wrap_is_deterministic() {
        let text = "Thanks for giving me the chance to learn and to do over\u{2014}over and \
                    over\u{2014}by being in your presence.\n\nYour friend,\nEthan";
        let font = default_view_config(FontFamily::Lora).measurer();
        let first = wrap_letter_to_measured_lines(text, 300.0, &font);
        let second = wrap_letter_to_measured_lines(text, 300.0, &font);
        assert_eq!(first, second);
    }

    #[test]
    fn test_accepts_trait_object_measurer() {
        let boxed: Box<dyn TextMeasurer> = Box::new(|s: &str| s.len() as f32);
        let lines = wrap_letter_to_measured_lines("ab cd", 2.0, boxed.as_ref());
        assert_eq!(texts(&lines), vec!["ab", "cd"]);
    }
}
