/// Fallback when nothing filesystem-safe survives.
pub const DEFAULT_SLUG: &str = "letter";

/// Turns arbitrary text into a filesystem-safe name restricted to `[a-z0-9._-]`.
///
/// Runs of whitespace and slashes become one hyphen, other characters are dropped,
/// repeated hyphens collapse, and edge hyphens are stripped. Idempotent.
pub fn slugify_filename(s: &str) -> String {
    let lowered = s.to_lowercase();

    let mut spaced = String::with_capacity(lowered.len());
    let mut in_separator = false;
    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            if !in_separator {
                spaced.push('-');
            }
            in_separator = true;
        } else {
            spaced.push(ch);
            in_separator = false;
        }
    }

    let mut cleaned = String::with_capacity(spaced.len());
    for ch in spaced.chars() {
        let allowed = ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '.' | '_' | '-');
        if !allowed || (ch == '-' && cleaned.ends_with('-')) {
            continue;
        }
        cleaned.push(ch);
    }

    let cleaned = cleaned.strip_prefix('-').unwrap_or(&cleaned);
    let cleaned = cleaned.strip_suffix('-').unwrap_or(cleaned);

    if cleaned.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic_name() {
        assert_eq!(slugify_filename("  Letter for Robbie  "), "letter-for-robbie");
    }

    #[test]
    fn test_slugify_slashes_and_backslashes() {
        assert_eq!(slugify_filename("drafts/2024\\final copy"), "drafts-2024-final-copy");
    }

    #[test]
    fn test_slugify_strips_disallowed_characters() {
        assert_eq!(slugify_filename("Héllo, World! (v2).txt"), "hllo-world-v2.txt");
    }

    #[test]
    fn test_slugify_collapses_hyphens_left_by_removed_chars() {
        assert_eq!(slugify_filename("a - & - b"), "a-b");
        assert_eq!(slugify_filename("--edge--"), "edge");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify_filename(""), "letter");
        assert_eq!(slugify_filename("  !!!  "), "letter");
        assert_eq!(slugify_filename("///"), "letter");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let inputs = [
            "",
            "Dear Robbie,",
            "  a//b  c ",
            "--x--",
            "Ünïcödé näme",
            "file.name_v1-FINAL",
            "-",
            "a\t\nb",
        ];
        for input in inputs {
            let once = slugify_filename(input);
            assert_eq!(slugify_filename(&once), once, "not idempotent for {input:?}");
        }
    }
}
