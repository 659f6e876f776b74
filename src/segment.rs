//! Intra-line word/character segmentation (component C7, `spec.md` §4.7).
//!
//! Tokenization follows the shape of the example pack's `word_diff.rs`
//! tokenizer (whitespace runs kept as their own tokens, word boundaries on
//! alphanumeric transitions), but the segmenter itself is deliberately just
//! common-prefix/suffix stripping rather than a full inner LCS, per
//! `spec.md` §4.7's explicit non-goal.

/// Granularity at which a line pair is segmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Word,
    Char,
}

/// The classification of one piece of a segmented line pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Deleted,
    Added,
}

/// One piece of a segmented `(oldLine, newLine)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Segments a deleted/added line pair into unchanged/deleted/added runs.
///
/// Emits, in order: `unchanged(prefix)`, `deleted(middleOld)`,
/// `added(middleNew)`, `unchanged(suffix)`, skipping any empty segment.
pub fn segment_line_pair(old: &str, new: &str, granularity: Granularity) -> Vec<Segment> {
    match granularity {
        Granularity::Word => segment_tokens(&tokenize_words(old), &tokenize_words(new)),
        Granularity::Char => segment_tokens(&tokenize_chars(old), &tokenize_chars(new)),
    }
}

fn segment_tokens(old: &[String], new: &[String]) -> Vec<Segment> {
    let max_common = old.len().min(new.len());

    let mut prefix = 0;
    while prefix < max_common && old[prefix] == new[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < max_common - prefix
        && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let mut segments = Vec::with_capacity(4);
    push_if_nonempty(&mut segments, SegmentKind::Unchanged, old[..prefix].concat());
    push_if_nonempty(
        &mut segments,
        SegmentKind::Deleted,
        old[prefix..old.len() - suffix].concat(),
    );
    push_if_nonempty(
        &mut segments,
        SegmentKind::Added,
        new[prefix..new.len() - suffix].concat(),
    );
    push_if_nonempty(
        &mut segments,
        SegmentKind::Unchanged,
        old[old.len() - suffix..].concat(),
    );
    segments
}

fn push_if_nonempty(segments: &mut Vec<Segment>, kind: SegmentKind, text: String) {
    if !text.is_empty() {
        segments.push(Segment { kind, text });
    }
}

/// Splits `line` into maximal whitespace and non-whitespace runs, each kept
/// as its own token (so concatenating all tokens reproduces `line` exactly).
fn tokenize_words(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_whitespace = false;

    for ch in line.chars() {
        let is_ws = ch.is_whitespace();
        if current.is_empty() {
            in_whitespace = is_ws;
            current.push(ch);
        } else if is_ws == in_whitespace {
            current.push(ch);
        } else {
            tokens.push(std::mem::take(&mut current));
            in_whitespace = is_ws;
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn tokenize_chars(line: &str) -> Vec<String> {
    line.chars().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_mode_finds_common_prefix_and_suffix() {
        let segs = segment_line_pair("let x = old_value;", "let x = new_value;", Granularity::Word);
        assert_eq!(segs.first().unwrap().kind, SegmentKind::Unchanged);
        assert_eq!(segs.last().unwrap().kind, SegmentKind::Unchanged);
        assert!(segs.iter().filter(|s| s.kind == SegmentKind::Deleted).count() <= 1);
        assert!(segs.iter().filter(|s| s.kind == SegmentKind::Added).count() <= 1);
    }

    #[test]
    fn char_mode_is_finer_grained_than_word_mode() {
        let word_segs = segment_line_pair("food", "fool", Granularity::Word);
        let char_segs = segment_line_pair("food", "fool", Granularity::Char);
        // Word mode sees the whole token change; char mode isolates the tail.
        assert_eq!(word_segs.iter().find(|s| s.kind == SegmentKind::Deleted).unwrap().text, "food");
        assert_eq!(char_segs.iter().find(|s| s.kind == SegmentKind::Deleted).unwrap().text, "d");
        assert_eq!(char_segs.iter().find(|s| s.kind == SegmentKind::Added).unwrap().text, "l");
    }

    #[test]
    fn identical_lines_are_entirely_unchanged() {
        let segs = segment_line_pair("same", "same", Granularity::Word);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::Unchanged);
        assert_eq!(segs[0].text, "same");
    }

    #[test]
    fn wholly_different_lines_have_no_shared_affixes() {
        let segs = segment_line_pair("abc", "xyz", Granularity::Char);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].kind, SegmentKind::Deleted);
        assert_eq!(segs[1].kind, SegmentKind::Added);
    }

    #[test]
    fn prefix_and_suffix_never_overlap_when_everything_matches_except_middle() {
        let segs = segment_line_pair("foo BAR baz", "foo qux baz", Granularity::Word);
        // "foo " prefix and " baz" suffix, middle word differs.
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].kind, SegmentKind::Unchanged);
        assert_eq!(segs[1].kind, SegmentKind::Deleted);
        assert_eq!(segs[2].kind, SegmentKind::Added);
        assert_eq!(segs[3].kind, SegmentKind::Unchanged);
    }
}
