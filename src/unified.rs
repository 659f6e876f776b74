//! Unified-diff text serialization (`spec.md` §4.8, §6).
//!
//! Adapted from the teacher's `UnifiedDiffBuilder` `write!`/`writeln!` style,
//! but simplified to a free function over already-assembled [`Hunk`]s rather
//! than a streaming [`crate::Sink`] implementation, since hunk assembly has
//! already run by the time this is called.

use std::fmt::Write;

use crate::hunk::{ChangeKind, Hunk};

/// Renders `hunks` as unified-diff text: one header line per hunk followed
/// immediately by its changes, each prefixed with `' '`, `'+'`, or `'-'`.
/// Hunks are back-to-back with no blank separator, and no
/// `\ No newline at end of file` marker is ever emitted (`spec.md` §6).
pub fn to_unified_string(hunks: &[Hunk]) -> String {
    let mut out = String::new();
    for hunk in hunks {
        writeln!(out, "{}", hunk.header).unwrap();
        for change in &hunk.changes {
            let prefix = match change.kind {
                ChangeKind::Normal => ' ',
                ChangeKind::Add => '+',
                ChangeKind::Delete => '-',
            };
            writeln!(out, "{prefix}{}", change.content).unwrap();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunk::Change;

    #[test]
    fn empty_hunks_produce_empty_string() {
        assert_eq!(to_unified_string(&[]), "");
    }

    #[test]
    fn renders_header_then_prefixed_changes() {
        let hunk = Hunk {
            old_start: 1,
            old_lines: 2,
            new_start: 1,
            new_lines: 2,
            header: "@@ -1,2 +1,2 @@".to_string(),
            changes: vec![
                Change { kind: ChangeKind::Normal, content: "a".to_string(), old_line_number: Some(1), new_line_number: Some(1) },
                Change { kind: ChangeKind::Delete, content: "b".to_string(), old_line_number: Some(2), new_line_number: None },
                Change { kind: ChangeKind::Add, content: "c".to_string(), old_line_number: None, new_line_number: Some(2) },
            ],
        };
        let out = to_unified_string(&[hunk]);
        assert_eq!(out, "@@ -1,2 +1,2 @@\n a\n-b\n+c\n");
    }

    #[test]
    fn hunks_are_back_to_back_with_no_blank_separator() {
        let make = |header: &str| Hunk {
            old_start: 1,
            old_lines: 1,
            new_start: 1,
            new_lines: 1,
            header: header.to_string(),
            changes: vec![Change { kind: ChangeKind::Normal, content: "x".to_string(), old_line_number: Some(1), new_line_number: Some(1) }],
        };
        let out = to_unified_string(&[make("@@ -1,1 +1,1 @@"), make("@@ -5,1 +5,1 @@")]);
        assert_eq!(out, "@@ -1,1 +1,1 @@\n x\n@@ -5,1 +5,1 @@\n x\n");
    }
}
