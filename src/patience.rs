//! The patience diff algorithm (component C4, `spec.md` §4.4).
//!
//! Anchors the diff on lines that occur exactly once in both sequences,
//! takes the longest increasing subsequence of those anchors (via patience
//! sorting), and recurses on the gaps between anchors. Falls back to Myers
//! when a region has no unique anchors, or once the recursion runs too deep
//! on pathological input.

use crate::intern::Token;
use crate::lcs::{patience_lis, unique_line_matches};
use crate::myers;
use crate::operation::{coalesce, Operation};
use crate::util::common_edges;

const MAX_RECURSION: u32 = 64;

/// Computes an edit script turning `old` into `new` using patience diff.
pub fn diff(old: &[Token], new: &[Token]) -> Vec<Operation> {
    let mut ops = Vec::new();
    recurse(old, new, 0, 0, 0, &mut ops);
    coalesce(ops)
}

fn recurse(old: &[Token], new: &[Token], old_off: u32, new_off: u32, depth: u32, out: &mut Vec<Operation>) {
    if old.is_empty() && new.is_empty() {
        return;
    }
    if old.is_empty() {
        out.push(Operation::insert(new_off, new_off + new.len() as u32, old_off));
        return;
    }
    if new.is_empty() {
        out.push(Operation::delete(old_off, old_off + old.len() as u32, new_off));
        return;
    }
    if depth >= MAX_RECURSION {
        for op in myers::diff(old, new) {
            out.push(shift(op, old_off, new_off));
        }
        return;
    }

    let (prefix, suffix) = common_edges(old, new);
    if prefix > 0 {
        out.push(Operation::equal(old_off, old_off + prefix, new_off, new_off + prefix));
    }

    let old_mid = &old[prefix as usize..old.len() - suffix as usize];
    let new_mid = &new[prefix as usize..new.len() - suffix as usize];
    let mid_old_off = old_off + prefix;
    let mid_new_off = new_off + prefix;

    if old_mid.is_empty() && new_mid.is_empty() {
        // nothing left in the middle
    } else if old_mid.is_empty() {
        out.push(Operation::insert(
            mid_new_off,
            mid_new_off + new_mid.len() as u32,
            mid_old_off,
        ));
    } else if new_mid.is_empty() {
        out.push(Operation::delete(
            mid_old_off,
            mid_old_off + old_mid.len() as u32,
            mid_new_off,
        ));
    } else {
        let matches = unique_line_matches(old_mid, new_mid);
        if matches.is_empty() {
            for op in myers::diff(old_mid, new_mid) {
                out.push(shift(op, mid_old_off, mid_new_off));
            }
        } else {
            let anchors = patience_lis(&matches);
            let (mut prev_old, mut prev_new) = (0u32, 0u32);
            for (oi, ni) in anchors {
                if oi > prev_old || ni > prev_new {
                    recurse(
                        &old_mid[prev_old as usize..oi as usize],
                        &new_mid[prev_new as usize..ni as usize],
                        mid_old_off + prev_old,
                        mid_new_off + prev_new,
                        depth + 1,
                        out,
                    );
                }
                out.push(Operation::equal(
                    mid_old_off + oi,
                    mid_old_off + oi + 1,
                    mid_new_off + ni,
                    mid_new_off + ni + 1,
                ));
                prev_old = oi + 1;
                prev_new = ni + 1;
            }
            if (prev_old as usize) < old_mid.len() || (prev_new as usize) < new_mid.len() {
                recurse(
                    &old_mid[prev_old as usize..],
                    &new_mid[prev_new as usize..],
                    mid_old_off + prev_old,
                    mid_new_off + prev_new,
                    depth + 1,
                    out,
                );
            }
        }
    }

    if suffix > 0 {
        let old_len = old.len() as u32;
        let new_len = new.len() as u32;
        out.push(Operation::equal(
            old_off + old_len - suffix,
            old_off + old_len,
            new_off + new_len - suffix,
            new_off + new_len,
        ));
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
