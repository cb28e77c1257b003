//! Text helpers shared by the personalization and layout engines.

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
