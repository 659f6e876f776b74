//! The edit-script data model shared by all three algorithms (`spec.md` §3).

/// The classification of a run of lines produced by a diff algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Lines present, unchanged, on both sides.
    Equal,
    /// Lines present only in the new sequence.
    Insert,
    /// Lines present only in the old sequence.
    Delete,
}

/// A run of consecutive lines classified as equal, inserted, or deleted.
///
/// Ranges are half-open and index into whatever line space the algorithm was
/// invoked on (normalized, possibly blank-filtered space) — the assembler is
/// responsible for reindexing into original (display) line space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub old_start: u32,
    pub old_end: u32,
    pub new_start: u32,
    pub new_end: u32,
}

impl Operation {
    pub(crate) fn equal(old_start: u32, old_end: u32, new_start: u32, new_end: u32) -> Self {
        Operation { kind: OperationKind::Equal, old_start, old_end, new_start, new_end }
    }

    pub(crate) fn delete(old_start: u32, old_end: u32, at_new: u32) -> Self {
        Operation { kind: OperationKind::Delete, old_start, old_end, new_start: at_new, new_end: at_new }
    }

    pub(crate) fn insert(new_start: u32, new_end: u32, at_old: u32) -> Self {
        Operation { kind: OperationKind::Insert, old_start: at_old, old_end: at_old, new_start, new_end }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.old_start == self.old_end && self.new_start == self.new_end
    }
}

/// Merges adjacent operations that share a `kind` and whose ranges are
/// contiguous, and drops empty operations. Every algorithm's recursive
/// construction can emit such runs at recursion boundaries; the invariant
/// in `spec.md` §3 ("adjacent operations never share a kind") is restored
/// here rather than by threading merge logic through every call site.
pub(crate) fn coalesce(ops: Vec<Operation>) -> Vec<Operation> {
    let mut out: Vec<Operation> = Vec::with_capacity(ops.len());
    for op in ops {
        if op.is_empty() {
            continue;
        }
        if let Some(last) = out.last_mut() {
            if last.kind == op.kind
                && last.old_end == op.old_start
                && last.new_end == op.new_start
            {
                last.old_end = op.old_end;
                last.new_end = op.new_end;
                continue;
            }
        }
        out.push(op);
    }
    out
}
