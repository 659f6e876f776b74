//! Operation-to-hunk assembly (component C6, `spec.md` §4.6).
//!
//! Change-range merging is grounded in the gap-merge logic of the example
//! pack's `git-diff` crate (`algorithm/mod.rs::edits_to_hunks`); the
//! reindex-through-`indexMap` step that recovers filtered blank lines is new
//! per `spec.md` §4.6 Step 1.

use crate::operation::{Operation, OperationKind};
use serde::{Deserialize, Serialize};

/// The rendering classification of a single emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present, unchanged, on both sides.
    Normal,
    /// Present only in the new text.
    Add,
    /// Present only in the old text.
    Delete,
}

/// A single rendered line inside a [`Hunk`].
///
/// Line numbers are 1-based; `Normal` carries both, `Add` only `new_line_number`,
/// `Delete` only `old_line_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub kind: ChangeKind,
    pub content: String,
    pub old_line_number: Option<u32>,
    pub new_line_number: Option<u32>,
}

/// A contiguous changed region plus its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub changes: Vec<Change>,
    pub header: String,
}

/// Maps a single filtered-space index to its original-space index via `map`,
/// or returns it unchanged when no filtering is in effect.
fn orig_index(map: Option<&[u32]>, p: u32) -> u32 {
    match map {
        Some(m) => m[p as usize],
        None => p,
    }
}

/// Reindexes `ops` (expressed in comparison/filtered-line space) into a flat
/// stream of [`Change`]s over the original display lines, reconciling any
/// interior blank lines that blank-line filtering removed from comparison.
///
/// Every operation is walked one display line at a time (never as a bulk
/// range) because the filtered-space-to-original-space mapping can diverge
/// in how many blank lines sat in front of each side at a given point.
/// Before each line is emitted, any gap between the running original-space
/// cursor and that line's target position is drained pairwise (oldest-first
/// zip) into `Normal` changes for as long as both sides still have undrained
/// lines; a remainder left over on just one side is dropped silently rather
/// than rendered as `Delete`/`Add` — see `spec.md` §4.6 Step 1 and the
/// resolved-open-question note in `SPEC_FULL.md` on why dropping (not
/// rendering) that remainder is what makes scenario 4 come out to zero hunks.
fn reindex_and_flatten(
    ops: &[Operation],
    old_display: &[&str],
    new_display: &[&str],
    old_index_map: Option<&[u32]>,
    new_index_map: Option<&[u32]>,
) -> Vec<Change> {
    let old_len = old_display.len() as u32;
    let new_len = new_display.len() as u32;
    let mut changes = Vec::new();
    let mut old_cursor = 0u32;
    let mut new_cursor = 0u32;

    let drain_gap = |changes: &mut Vec<Change>, old_cursor: &mut u32, new_cursor: &mut u32, to_old: u32, to_new: u32| {
        while *old_cursor < to_old && *new_cursor < to_new {
            changes.push(Change {
                kind: ChangeKind::Normal,
                content: old_display[*old_cursor as usize].to_string(),
                old_line_number: Some(*old_cursor + 1),
                new_line_number: Some(*new_cursor + 1),
            });
            *old_cursor += 1;
            *new_cursor += 1;
        }
        // Any remainder is a blank line that filtering removed on only one
        // side; it has no counterpart to pair with, so it is dropped rather
        // than surfaced as a change.
        *old_cursor = to_old;
        *new_cursor = to_new;
    };

    for op in ops {
        match op.kind {
            OperationKind::Equal => {
                for k in 0..op.old_end - op.old_start {
                    let oi = orig_index(old_index_map, op.old_start + k);
                    let nj = orig_index(new_index_map, op.new_start + k);
                    drain_gap(&mut changes, &mut old_cursor, &mut new_cursor, oi, nj);
                    changes.push(Change {
                        kind: ChangeKind::Normal,
                        content: old_display[oi as usize].to_string(),
                        old_line_number: Some(oi + 1),
                        new_line_number: Some(nj + 1),
                    });
                    old_cursor = oi + 1;
                    new_cursor = nj + 1;
                }
            }
            OperationKind::Delete => {
                for k in 0..op.old_end - op.old_start {
                    let oi = orig_index(old_index_map, op.old_start + k);
                    drain_gap(&mut changes, &mut old_cursor, &mut new_cursor, oi, new_cursor);
                    changes.push(Change {
                        kind: ChangeKind::Delete,
                        content: old_display[oi as usize].to_string(),
                        old_line_number: Some(oi + 1),
                        new_line_number: None,
                    });
                    old_cursor = oi + 1;
                }
            }
            OperationKind::Insert => {
                for k in 0..op.new_end - op.new_start {
                    let nj = orig_index(new_index_map, op.new_start + k);
                    drain_gap(&mut changes, &mut old_cursor, &mut new_cursor, old_cursor, nj);
                    changes.push(Change {
                        kind: ChangeKind::Add,
                        content: new_display[nj as usize].to_string(),
                        old_line_number: None,
                        new_line_number: Some(nj + 1),
                    });
                    new_cursor = nj + 1;
                }
            }
        }
    }

    drain_gap(&mut changes, &mut old_cursor, &mut new_cursor, old_len, new_len);
    changes
}

/// Groups a flat `Change` stream into hunks bounded by `context` lines of
/// surrounding `Normal` changes, per `spec.md` §4.6 Step 3.
fn group_into_hunks(changes: &[Change], context: u32) -> Vec<Hunk> {
    if changes.is_empty() {
        return Vec::new();
    }
    let ctx = context as usize;

    let mut change_ranges: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < changes.len() {
        if changes[i].kind == ChangeKind::Normal {
            i += 1;
            continue;
        }
        let start = i;
        while i < changes.len() && changes[i].kind != ChangeKind::Normal {
            i += 1;
        }
        change_ranges.push((start, i));
    }
    if change_ranges.is_empty() {
        return Vec::new();
    }

    let mut merged: Vec<(usize, usize)> = Vec::new();
    let mut current = change_ranges[0];
    for &(start, end) in &change_ranges[1..] {
        if start - current.1 <= 2 * ctx {
            current.1 = end;
        } else {
            merged.push(current);
            current = (start, end);
        }
    }
    merged.push(current);

    merged
        .into_iter()
        .map(|(change_start, change_end)| {
            let hunk_start = change_start.saturating_sub(ctx);
            let hunk_end = (change_end + ctx).min(changes.len());
            build_hunk(&changes[hunk_start..hunk_end])
        })
        .collect()
}

fn build_hunk(changes: &[Change]) -> Hunk {
    let old_start = changes
        .iter()
        .find_map(|c| c.old_line_number)
        .unwrap_or(0);
    let new_start = changes
        .iter()
        .find_map(|c| c.new_line_number)
        .unwrap_or(0);
    let old_lines = changes
        .iter()
        .filter(|c| c.kind != ChangeKind::Add)
        .count() as u32;
    let new_lines = changes
        .iter()
        .filter(|c| c.kind != ChangeKind::Delete)
        .count() as u32;
    let header = format!("@@ -{old_start},{old_lines} +{new_start},{new_lines} @@");
    Hunk { old_start, old_lines, new_start, new_lines, changes: changes.to_vec(), header }
}

/// Assembles `ops` (in comparison/filtered-line space) into hunks over the
/// original display lines.
pub fn assemble(
    ops: &[Operation],
    old_display: &[&str],
    new_display: &[&str],
    old_index_map: Option<&[u32]>,
    new_index_map: Option<&[u32]>,
    context: u32,
) -> Vec<Hunk> {
    let changes = reindex_and_flatten(ops, old_display, new_display, old_index_map, new_index_map);
    group_into_hunks(&changes, context)
}
