//! The histogram diff algorithm (component C5, `spec.md` §4.5).
//!
//! A git-style histogram diff: build an occurrence index of the "old" side,
//! pick the rarest line shared by both sides as an anchor, extend it into
//! the longest run of matching lines around that anchor, and recurse on the
//! gaps to either side. Lines occurring too often (`MAX_CHAIN_LEN`) are
//! skipped in favor of a Myers fallback, guarding against the quadratic
//! worst case on highly repetitive input. Recursion depth is separately
//! capped at `MAX_DEPTH`, also falling back to Myers on the remainder
//! (`spec.md` §4.5 step 1).
//!
//! The occurrence index here is a plain `Vec<Vec<u32>>` keyed by token id,
//! rather than the teacher's custom size-class list pool — the pool exists
//! purely as a micro-optimization this crate doesn't need. It is built once
//! over the full "old" side (not once per recursive call): each recursive
//! call restricts lookups to its own segment's index range via binary
//! search on the shared, globally-indexed table instead of rebuilding the
//! whole `num_tokens`-sized table at every recursion level.

use crate::intern::Token;
use crate::myers;
use crate::operation::{coalesce, Operation};

/// Lines occurring more than this many times in the "old" side are treated
/// as noise and excluded from anchor selection.
const MAX_CHAIN_LEN: u32 = 63;

/// Recursion depth past which the remainder is handed to Myers instead of
/// recursing further, bounding this algorithm's worst case on pathological
/// input (`spec.md` §4.5 step 1, testable property #7).
const MAX_DEPTH: u32 = 64;

/// Computes an edit script turning `old` into `new` using histogram diff.
///
/// `num_tokens` must be at least one greater than the largest [`Token`] id
/// appearing in either slice (as returned by `Interner::num_tokens`).
pub fn diff(old: &[Token], new: &[Token], num_tokens: u32) -> Vec<Operation> {
    let mut ops = Vec::new();
    let occurrences = build_occurrences(old, num_tokens);
    recurse(old, new, 0, 0, 0, &occurrences, &mut ops);
    coalesce(ops)
}

fn recurse(
    before: &[Token],
    after: &[Token],
    before_off: u32,
    after_off: u32,
    depth: u32,
    occurrences: &[Vec<u32>],
    out: &mut Vec<Operation>,
) {
    if before.is_empty() && after.is_empty() {
        return;
    }
    if before.is_empty() {
        out.push(Operation::insert(after_off, after_off + after.len() as u32, before_off));
        return;
    }
    if after.is_empty() {
        out.push(Operation::delete(before_off, before_off + before.len() as u32, after_off));
        return;
    }
    if depth >= MAX_DEPTH {
        for op in myers::diff(before, after) {
            out.push(shift(op, before_off, after_off));
        }
        return;
    }

    match find_lcs(before, after, before_off, occurrences) {
        Some(lcs) if lcs.len == 0 => {
            out.push(Operation::delete(before_off, before_off + before.len() as u32, after_off));
            out.push(Operation::insert(
                after_off,
                after_off + after.len() as u32,
                before_off + before.len() as u32,
            ));
        }
        Some(lcs) => {
            recurse(
                &before[..lcs.before_start as usize],
                &after[..lcs.after_start as usize],
                before_off,
                after_off,
                depth + 1,
                occurrences,
                out,
            );

            out.push(Operation::equal(
                before_off + lcs.before_start,
                before_off + lcs.before_start + lcs.len,
                after_off + lcs.after_start,
                after_off + lcs.after_start + lcs.len,
            ));

            let before_end = lcs.before_start + lcs.len;
            let after_end = lcs.after_start + lcs.len;
            recurse(
                &before[before_end as usize..],
                &after[after_end as usize..],
                before_off + before_end,
                after_off + after_end,
                depth + 1,
                occurrences,
                out,
            );
        }
        None => {
            // Both sides are dominated by high-occurrence lines: fall back
            // to Myers to keep this linear instead of quadratic.
            for op in myers::diff(before, after) {
                out.push(shift(op, before_off, after_off));
            }
        }
    }
}

fn shift(op: Operation, old_by: u32, new_by: u32) -> Operation {
    Operation {
        old_start: op.old_start + old_by,
        old_end: op.old_end + old_by,
        new_start: op.new_start + new_by,
        new_end: op.new_end + new_by,
        ..op
    }
}

/// Builds a global occurrence index over the full top-level "old" side,
/// keyed by token id, once per [`diff`] call. Indices stored are positions
/// into that top-level slice; each per-token list is ascending since it is
/// built by a single left-to-right scan.
fn build_occurrences(before: &[Token], num_tokens: u32) -> Vec<Vec<u32>> {
    let mut occurrences = vec![Vec::new(); num_tokens as usize];
    for (i, &tok) in before.iter().enumerate() {
        occurrences[tok.0 as usize].push(i as u32);
    }
    occurrences
}

/// Counts `tok`'s occurrences within the current segment `[before_off,
/// before_off + before_len)` of the shared, globally-indexed table, via
/// binary search rather than a per-call rebuild.
fn num_occurrences_in_range(occurrences: &[Vec<u32>], tok: Token, before_off: u32, before_len: u32) -> u32 {
    let hi = before_off + before_len;
    let list = &occurrences[tok.0 as usize];
    let start = list.partition_point(|&x| x < before_off);
    let end = list.partition_point(|&x| x < hi);
    (end - start) as u32
}

/// Iterates `tok`'s occurrences within the current segment, translated from
/// global (top-level) indices to indices local to that segment.
fn local_occurrences<'a>(
    occurrences: &'a [Vec<u32>],
    tok: Token,
    before_off: u32,
    before_len: u32,
) -> impl Iterator<Item = u32> + 'a {
    let hi = before_off + before_len;
    let list = &occurrences[tok.0 as usize];
    let start = list.partition_point(move |&x| x < before_off);
    let end = list.partition_point(move |&x| x < hi);
    list[start..end].iter().map(move |&g| g - before_off)
}

#[derive(Default, Debug, Clone, Copy)]
struct Lcs {
    before_start: u32,
    after_start: u32,
    len: u32,
}

/// Scans `after` for the lowest-occurrence anchor shared with `before`,
/// extending each candidate match into a run in both directions, and keeps
/// the longest (ties broken toward the rarer anchor).
///
/// Returns `None` when every shared line occurs more than `MAX_CHAIN_LEN`
/// times (the Myers-fallback trigger), `Some(Lcs { len: 0, .. })` when the
/// sides share nothing at all.
fn find_lcs(before: &[Token], after: &[Token], before_off: u32, occurrences: &[Vec<u32>]) -> Option<Lcs> {
    let mut best = Lcs::default();
    let mut min_occurrences = MAX_CHAIN_LEN + 1;
    let mut found_common = false;
    let before_len = before.len() as u32;

    let num_occurrences = |tok: Token| num_occurrences_in_range(occurrences, tok, before_off, before_len);

    let mut pos = 0u32;
    while let Some(&token) = after.get(pos as usize) {
        let count = num_occurrences(token);
        if count != 0 {
            found_common = true;
            if count <= min_occurrences {
                pos = update_lcs(before, after, before_off, occurrences, token, pos, &mut best, &mut min_occurrences);
                continue;
            }
        }
        pos += 1;
    }

    if !found_common || min_occurrences <= MAX_CHAIN_LEN {
        Some(best)
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
fn update_lcs(
    before: &[Token],
    after: &[Token],
    before_off: u32,
    occurrences: &[Vec<u32>],
    token: Token,
    after_pos: u32,
    best: &mut Lcs,
    min_occurrences: &mut u32,
) -> u32 {
    let before_len = before.len() as u32;
    let num_occurrences = |tok: Token| num_occurrences_in_range(occurrences, tok, before_off, before_len);
    let mut next_after_pos = after_pos + 1;
    let mut occurrence_iter = local_occurrences(occurrences, token, before_off, before_len);
    let mut before_idx = occurrence_iter.next().unwrap();

    'occurrences: loop {
        let mut run_occurrences = num_occurrences(before[before_idx as usize]);
        let mut start1 = before_idx;
        let mut start2 = after_pos;
        while start1 > 0 && start2 > 0 && before[start1 as usize - 1] == after[start2 as usize - 1] {
            start1 -= 1;
            start2 -= 1;
            run_occurrences = run_occurrences.min(num_occurrences(before[start1 as usize]));
        }

        let mut end1 = before_idx + 1;
        let mut end2 = after_pos + 1;
        while (end1 as usize) < before.len()
            && (end2 as usize) < after.len()
            && before[end1 as usize] == after[end2 as usize]
        {
            run_occurrences = run_occurrences.min(num_occurrences(before[end1 as usize]));
            end1 += 1;
            end2 += 1;
        }

        next_after_pos = next_after_pos.max(end2);

        let len = end2 - start2;
        if best.len < len || *min_occurrences > run_occurrences {
            *min_occurrences = run_occurrences;
            *best = Lcs { before_start: start1, after_start: start2, len };
        }

        loop {
            match occurrence_iter.next() {
                Some(next_idx) if next_idx > end2 => {
                    before_idx = next_idx;
                    break;
                }
                Some(_) => continue,
                None => break 'occurrences,
            }
        }
    }

    next_after_pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationKind;

    fn toks(values: &[u32]) -> Vec<Token> {
        values.iter().map(|&v| Token(v)).collect()
    }

    #[test]
    fn identical_is_all_equal() {
        let a = toks(&[1, 2, 3]);
        let ops = diff(&a, &a, 4);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OperationKind::Equal);
    }

    #[test]
    fn anchors_on_rarest_shared_line() {
        let a = toks(&[1, 1, 2, 1, 1]);
        let b = toks(&[1, 1, 2, 9, 1, 1]);
        let ops = diff(&a, &b, 10);
        let inserts: u32 = ops
            .iter()
            .filter(|op| op.kind == OperationKind::Insert)
            .map(|op| op.new_end - op.new_start)
            .sum();
        assert_eq!(inserts, 1);
    }

    #[test]
    fn disjoint_sequences_become_delete_and_insert() {
        let a = toks(&[1, 2]);
        let b = toks(&[3, 4]);
        let ops = diff(&a, &b, 5);
        assert_eq!(
            ops.iter().map(|op| op.kind).collect::<Vec<_>>(),
            vec![OperationKind::Delete, OperationKind::Insert]
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(diff(&[], &[], 1).is_empty());
        let b = toks(&[1, 2]);
        assert_eq!(diff(&[], &b, 3), vec![Operation::insert(0, 2, 0)]);
        assert_eq!(diff(&b, &[], 3), vec![Operation::delete(0, 2, 0)]);
    }
}
