//! Record extraction from the rendered text of the directory PDF.
//!
//! The PDF is a printed list, not a data file, so this is a best-effort
//! grammar over text lines:
//!
//! * an entry starts with an extension of three or more digits followed by
//!   whitespace and at least one more field;
//! * in the dash layout (`301 - PA1ABC - Jan`) several entries may share one
//!   rendered line, so lines are cut at every `<digits> - ` marker first;
//! * the first field is taken as the callsign when it looks like one,
//!   everything after it is the name.
//!
//! Anything else (titles, page numbers, footers, blank lines) is skipped and
//! only counted.

use crate::domain::model::DirectoryRecord;
use regex::Regex;
use std::sync::LazyLock;

static ENTRY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d{3,})\s+-\s").expect("entry marker regex"));

static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3,})\s+(\S.*)$").expect("entry regex"));

const FIELD_SEPARATOR: &str = " - ";

/// Result of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<DirectoryRecord>,
    /// Non-blank lines that produced no record.
    pub skipped_lines: usize,
}

/// Parse the whole document text, keeping document order.
pub fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let records = parse_line(line);
        if records.is_empty() {
            tracing::debug!("Skipping line {}: {:?}", index + 1, line);
            extraction.skipped_lines += 1;
        } else {
            extraction.records.extend(records);
        }
    }

    tracing::info!(
        "Extracted {} records ({} lines skipped)",
        extraction.records.len(),
        extraction.skipped_lines
    );
    extraction
}

/// Parse one rendered line into zero or more records.
///
/// The line is cut at every dash-layout marker; text in front of the first
/// marker is a segment of its own (a whitespace-layout entry or a heading).
pub fn parse_line(line: &str) -> Vec<DirectoryRecord> {
    let mut bounds: Vec<usize> = ENTRY_MARKER
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.start()))
        .collect();
    if bounds.first() != Some(&0) {
        bounds.insert(0, 0);
    }
    bounds.push(line.len());

    bounds
        .windows(2)
        .filter_map(|w| parse_entry(&line[w[0]..w[1]]))
        .collect()
}

/// Parse a single entry segment such as `101 AB1CD John Smith` or
/// `301 - PA1ABC - Jan`.
pub fn parse_entry(segment: &str) -> Option<DirectoryRecord> {
    let caps = ENTRY.captures(segment.trim())?;
    let extension = caps.get(1)?.as_str();
    let rest = trim_field(caps.get(2)?.as_str());
    if rest.is_empty() {
        return None;
    }

    let (callsign, name) = split_callsign(rest);
    if callsign.is_empty() && name.is_empty() {
        return None;
    }

    Some(DirectoryRecord::new(extension, callsign, name))
}

fn split_callsign(rest: &str) -> (String, String) {
    if let Some((first, remainder)) = rest.split_once(FIELD_SEPARATOR) {
        let first = first.trim();
        if is_callsign(first) {
            return (first.to_ascii_uppercase(), normalize_name(remainder));
        }
    }

    let mut tokens = rest.splitn(2, char::is_whitespace);
    let first = tokens.next().unwrap_or_default();
    if is_callsign(first) {
        let remainder = tokens.next().unwrap_or_default();
        return (first.to_ascii_uppercase(), normalize_name(remainder));
    }

    (String::new(), normalize_name(rest))
}

/// Callsign shape: 3 to 10 chars of letters, digits and `/`, with at least
/// one letter and one digit, not starting or ending with `/`.
pub fn is_callsign(token: &str) -> bool {
    let len = token.len();
    if !(3..=10).contains(&len) || token.starts_with('/') || token.ends_with('/') {
        return false;
    }
    if !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '/') {
        return false;
    }
    token.chars().any(|c| c.is_ascii_alphabetic()) && token.chars().any(|c| c.is_ascii_digit())
}

fn normalize_name(raw: &str) -> String {
    trim_field(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trim_field(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '-' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(extension: &str, callsign: &str, name: &str) -> DirectoryRecord {
        DirectoryRecord::new(extension, callsign, name)
    }

    #[test]
    fn test_whitespace_layout_with_garbage() {
        let text = "101 AB1CD John Smith\ngarbage line\n1002 Repeater Node\n";
        let extraction = extract(text);

        assert_eq!(
            extraction.records,
            vec![
                record("101", "AB1CD", "John Smith"),
                record("1002", "", "Repeater Node"),
            ]
        );
        assert_eq!(extraction.skipped_lines, 1);
    }

    #[test]
    fn test_dash_layout() {
        assert_eq!(
            parse_entry("301 - pa1abc - Jan de Vries"),
            Some(record("301", "PA1ABC", "Jan de Vries"))
        );
        assert_eq!(
            parse_entry("2001 - Repeater Amsterdam"),
            Some(record("2001", "", "Repeater Amsterdam"))
        );
        assert_eq!(parse_entry("302 - PD2XYZ"), Some(record("302", "PD2XYZ", "")));
    }

    #[test]
    fn test_multiple_entries_on_one_line() {
        let records = parse_line("301 - PA1ABC - Jan 302 - PD2XYZ - Piet 4001 - Echo test");
        assert_eq!(
            records,
            vec![
                record("301", "PA1ABC", "Jan"),
                record("302", "PD2XYZ", "Piet"),
                record("4001", "", "Echo test"),
            ]
        );
    }

    #[test]
    fn test_heading_before_first_entry_is_dropped() {
        let records = parse_line("Extensions 301 - PA1ABC - Jan 302 - PD2XYZ - Piet");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].extension, "301");
    }

    #[test]
    fn test_single_marker_after_heading() {
        assert_eq!(
            parse_line("Extensions 301 - PA1ABC - Jan"),
            vec![record("301", "PA1ABC", "Jan")]
        );
    }

    #[test]
    fn test_whitespace_entry_followed_by_dash_entry() {
        assert_eq!(
            parse_line("101 AB1CD John 302 - PD2XYZ - Piet"),
            vec![record("101", "AB1CD", "John"), record("302", "PD2XYZ", "Piet")]
        );
    }

    #[test]
    fn test_heading_only_line_with_marker_is_skipped() {
        let extraction = extract("Hamvoip extensions\nList version 2 3 - draft\n");
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped_lines, 2);
    }

    #[test]
    fn test_skips_non_entries() {
        for line in [
            "",
            "Hamvoip extensions",
            "Page 1 of 3",
            "101",
            "101 -",
            "12 AB1CD Short",
            "1234abc Not separated",
        ] {
            assert!(parse_line(line).is_empty(), "line {:?} should be skipped", line);
        }
    }

    #[test]
    fn test_name_keeps_inner_dashes_and_collapses_whitespace() {
        assert_eq!(
            parse_entry("101 AB1CD   John   Smith - Utrecht"),
            Some(record("101", "AB1CD", "John Smith - Utrecht"))
        );
        assert_eq!(
            parse_entry("5000 Net - Thursday   evening"),
            Some(record("5000", "", "Net - Thursday evening"))
        );
    }

    #[test]
    fn test_callsign_shape() {
        assert!(is_callsign("AB1CD"));
        assert!(is_callsign("pa3xyz"));
        assert!(is_callsign("PA1ABC/P"));
        assert!(!is_callsign("Repeater"));
        assert!(!is_callsign("1234"));
        assert!(!is_callsign("A1"));
        assert!(!is_callsign("PA1ABC/"));
        assert!(!is_callsign("John-1"));
    }

    #[test]
    fn test_order_and_count_preserved_with_noise() {
        let mut text = String::from("Hamvoip directory\n\n");
        for i in 0..20 {
            text.push_str(&format!("{} PA{}AB Name {}\n", 100 + i, i % 10, i));
            if i % 5 == 0 {
                text.push_str("-- page break --\n");
            }
        }

        let records = extract(&text).records;
        assert_eq!(records.len(), 20);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.extension, (100 + i).to_string());
        }
    }

    #[test]
    fn test_empty_document() {
        let extraction = extract("\n\n   \n");
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped_lines, 0);
    }
}
