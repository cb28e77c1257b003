//! Recipient parsing from text pasted out of a spreadsheet or exported as CSV.
//!
//! The first non-blank line is the header. A tab anywhere in it selects tab-delimited mode;
//! otherwise fields are comma-separated with double-quote handling. Tab-delimited lines get
//! no quote handling at all.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::RecipientRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipients {
    pub recipients: Vec<RecipientRecord>,
    /// Deduplicated, non-empty header names in column order.
    pub headers: Vec<String>,
    /// Advisory, non-fatal.
    pub warnings: Vec<String>,
}

/// Parses delimited text into recipient records. Never fails; problems become warnings.
pub fn parse_recipients_from_text(input: &str) -> ParsedRecipients {
    let mut warnings = Vec::new();

    let raw_lines: Vec<&str> = input
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let Some((header_line, rows)) = raw_lines.split_first() else {
        return ParsedRecipients::default();
    };

    let delimiter = if header_line.contains('\t') { '\t' } else { ',' };

    // Empty header cells are dropped; row values are matched to the surviving headers by
    // position, so columns after an empty header shift left.
    let headers = dedupe_headers(
        parse_delimited_line(header_line, delimiter)
            .iter()
            .map(|h| strip_outer_quotes(h).trim().to_string()),
        &mut warnings,
    );

    let mut recipients = Vec::new();
    for row in rows {
        let cols = parse_delimited_line(row, delimiter);
        if cols.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let mut record = RecipientRecord::new();
        for (col_idx, key) in headers.iter().enumerate() {
            let value = cols.get(col_idx).map(String::as_str).unwrap_or("");
            record.insert(key.as_str(), strip_outer_quotes(value).trim().to_string());
        }
        recipients.push(record);
    }

    if headers.is_empty() {
        warnings.push("No headers found in the first row.".to_string());
    }
    if recipients.is_empty() {
        warnings
            .push("No recipient rows found (need at least one row under the header).".to_string());
    }

    ParsedRecipients {
        recipients,
        headers,
        warnings,
    }
}

/// Splits one line into trimmed fields.
///
/// With a comma delimiter a `"` toggles quoted state and `""` inside quotes is a literal
/// quote; the delimiter only separates fields outside quotes.
pub fn parse_delimited_line(line: &str, delimiter: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if delimiter == ',' && ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                cur.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if !in_quotes && ch == delimiter {
            out.push(std::mem::take(&mut cur));
            continue;
        }

        cur.push(ch);
    }
    out.push(cur);

    out.into_iter().map(|s| s.trim().to_string()).collect()
}

/// Renames repeated headers to `name_2`, `name_3`, ... (first free suffix), one warning each.
fn dedupe_headers(
    headers: impl Iterator<Item = String>,
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for header in headers {
        if header.is_empty() {
            continue;
        }
        if taken.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let mut n = 2;
        while taken.contains(&format!("{header}_{n}")) {
            n += 1;
        }
        let renamed = format!("{header}_{n}");
        taken.insert(renamed.clone());
        warnings.push(format!("Duplicate header \"{header}\" renamed to \"{renamed}\"."));
        out.push(renamed);
    }

    out
}

/// Removes one leading and one trailing `"`, independently.
fn strip_outer_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}
