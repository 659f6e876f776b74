//! Line splitting and normalization (component C1).
//!
//! Splitting is grounded in the teacher's `sources.rs` byte-line splitter
//! (`memchr`-based, terminator-inclusive); normalization and blank-line
//! filtering are new per `spec.md` §4.1.

use memchr::memchr;
use serde::{Deserialize, Serialize};

/// How whitespace is treated before comparing two lines.
///
/// Constructed from the enumerated option values in `spec.md` §6. Several
/// source spellings (`all`, `ignore`, `true`) collapse onto [`WhitespaceRule::All`];
/// an unrecognized spelling is tolerantly treated as [`WhitespaceRule::Off`]
/// per `spec.md` §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceRule {
    /// Lines are compared byte-for-byte (after case folding, if enabled).
    #[default]
    Off,
    /// Every whitespace character is removed before comparison.
    All,
    /// Leading whitespace is stripped.
    Leading,
    /// Trailing whitespace is stripped.
    Trailing,
    /// Every maximal run of whitespace is collapsed to a single space.
    Collapse,
}

impl WhitespaceRule {
    /// Parses one of the option spellings from `spec.md` §6.
    ///
    /// Unknown spellings tolerantly fall back to [`WhitespaceRule::Off`]
    /// (`spec.md` §7: "Unknown whitespace rule -> treated as off").
    pub fn parse(s: &str) -> WhitespaceRule {
        match s {
            "off" => WhitespaceRule::Off,
            "all" | "ignore" | "true" => WhitespaceRule::All,
            "leading" => WhitespaceRule::Leading,
            "trailing" => WhitespaceRule::Trailing,
            "collapse" => WhitespaceRule::Collapse,
            _ => WhitespaceRule::Off,
        }
    }
}

/// Splits `text` on line terminators (`\r\n`, `\r`, or `\n`), keeping a
/// trailing empty line if `text` is non-empty and ends with a terminator.
///
/// This is the raw form used internally by [`display_lines`]; algorithms
/// never see this form directly (`spec.md` §9, resolved Open Question 2).
fn split_lines_raw(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    while start <= bytes.len() {
        if start == bytes.len() {
            // Only reachable when the previous terminator ended exactly at
            // the end of input: emit the trailing empty line.
            lines.push("");
            break;
        }
        let rest = &bytes[start..];
        match memchr(b'\n', rest) {
            Some(rel) => {
                let mut end = start + rel;
                // `\r\n`
                if end > start && bytes[end - 1] == b'\r' {
                    end -= 1;
                }
                lines.push(unsafe { std::str::from_utf8_unchecked(&bytes[start..end]) });
                start += rel + 1;
            }
            None => {
                // No more `\n`; check for a lone trailing `\r`.
                if let Some(rel) = rest.iter().position(|&b| b == b'\r') {
                    lines.push(unsafe { std::str::from_utf8_unchecked(&rest[..rel]) });
                    start += rel + 1;
                } else {
                    lines.push(unsafe { std::str::from_utf8_unchecked(rest) });
                    break;
                }
            }
        }
    }
    lines
}

/// Splits `text` into display lines: the terminator is stripped from each
/// line and, if `text` ended with a terminator, the resulting trailing empty
/// line is removed (`spec.md` §3, §4.1 `getLines`).
pub fn display_lines(text: &str) -> Vec<&str> {
    let mut lines = split_lines_raw(text);
    if text.is_empty() {
        return lines;
    }
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Applies the whitespace rule, optional trim, and optional case fold to a
/// single line, in the order given by `spec.md` §4.1.
pub fn normalize_line(line: &str, whitespace: WhitespaceRule, trim: bool, ignore_case: bool) -> String {
    let mut out = match whitespace {
        WhitespaceRule::Off => {
            if trim {
                line.trim().to_string()
            } else {
                line.to_string()
            }
        }
        WhitespaceRule::All => line.chars().filter(|c| !c.is_whitespace()).collect(),
        WhitespaceRule::Leading => line.trim_start().to_string(),
        WhitespaceRule::Trailing => line.trim_end().to_string(),
        WhitespaceRule::Collapse => collapse_whitespace(line),
    };
    if ignore_case {
        out = out.to_lowercase();
    }
    out
}

fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_run = false;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Removes lines whose trimmed form is empty, returning the surviving
/// (normalized) lines and a map from surviving index to original index
/// (`spec.md` §4.1 `filterBlankLines`).
pub fn filter_blank_lines(normalized: &[String]) -> (Vec<String>, Vec<u32>) {
    let mut filtered = Vec::with_capacity(normalized.len());
    let mut index_map = Vec::with_capacity(normalized.len());
    for (i, line) in normalized.iter().enumerate() {
        if !line.trim().is_empty() {
            filtered.push(line.clone());
            index_map.push(i as u32);
        }
    }
    (filtered, index_map)
}
