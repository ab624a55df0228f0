//! Line normalization and data-row tokenization
//!
//! LAS data rows are delimiter-separated, but text values may be wrapped in
//! double quotes and contain the delimiter themselves. Quote characters are
//! kept in the field so callers can recognize text values.

use crate::constants::QUOTE;

/// Byte-order mark some editors put at the start of the file
const BOM: char = '\u{feff}';

/// Trim a raw line and collapse whitespace runs into a single space.
///
/// Tabs are treated as whitespace unless the tab is the data delimiter, in
/// which case they are kept as-is.
pub fn normalize_line(raw: &str, delimiter: char) -> String {
    let trimmed = raw.trim_start_matches(BOM).trim();
    let mut normalized = String::with_capacity(trimmed.len());
    let mut pending_space = false;

    for c in trimmed.chars() {
        if c == '\t' && delimiter == '\t' {
            normalized.push(c);
            pending_space = false;
        } else if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !normalized.ends_with('\t') {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.push(c);
        }
    }

    normalized
}

/// Split a data line into fields on `delimiter`, keeping quoted substrings whole.
///
/// Fields are trimmed. Quotes do not nest and cannot be escaped; an unbalanced
/// quote extends to the end of the line.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    if !line.contains(QUOTE) {
        return line
            .split(delimiter)
            .map(|field| field.trim().to_string())
            .collect();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == QUOTE {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// A value written between quotes is text
pub fn is_quoted(field: &str) -> bool {
    field.contains(QUOTE)
}
