//! The classical Myers diff algorithm (component C3, `spec.md` §4.3).
//!
//! This is Eugene Myers' `O(ND)` algorithm as described in "An O(ND)
//! Difference Algorithm and Its Variations" (1986): a full `V` array is
//! recorded at every `D` and walked backwards to reconstruct the edit path.
//! Ported from the classical (non-linear-space) variant rather than the
//! teacher's divide-and-conquer one, since `spec.md` §4.3 describes the
//! literal backtracking form.

use crate::intern::Token;
use crate::operation::{coalesce, Operation};
use crate::util::common_edges;

/// Computes the minimal edit script turning `old` into `new` using Myers'
/// algorithm.
///
/// Deletions are always emitted before the insertions they're paired with at
/// the same position, matching `spec.md` §4.3's ordering invariant.
pub fn diff(old: &[Token], new: &[Token]) -> Vec<Operation> {
    let (prefix, suffix) = common_edges(old, new);
    let old_trimmed = &old[prefix as usize..old.len() - suffix as usize];
    let new_trimmed = &new[prefix as usize..new.len() - suffix as usize];

    let mut ops = Vec::new();
    if prefix > 0 {
        ops.push(Operation::equal(0, prefix, 0, prefix));
    }

    for op in myers_inner(old_trimmed, new_trimmed) {
        ops.push(shift(op, prefix));
    }

    if suffix > 0 {
        let old_len = old.len() as u32;
        let new_len = new.len() as u32;
        ops.push(Operation::equal(old_len - suffix, old_len, new_len - suffix, new_len));
    }

    coalesce(ops)
}

fn shift(op: Operation, by: u32) -> Operation {
    Operation {
        old_start: op.old_start + by,
        old_end: op.old_end + by,
        new_start: op.new_start + by,
        new_end: op.new_end + by,
        ..op
    }
}

/// Core algorithm on already prefix/suffix-trimmed slices, indices relative
/// to the start of those slices.
fn myers_inner(old: &[Token], new: &[Token]) -> Vec<Operation> {
    let n = old.len();
    let m = new.len();

    if n == 0 && m == 0 {
        return Vec::new();
    }
    if n == 0 {
        return vec![Operation::insert(0, m as u32, 0)];
    }
    if m == 0 {
        return vec![Operation::delete(0, n as u32, 0)];
    }

    let max_d = n + m;
    let v_size = 2 * max_d + 1;
    let offset = max_d as isize;

    let mut trace: Vec<Vec<usize>> = Vec::new();
    let mut v = vec![0usize; v_size];

    'outer: for d in 0..=max_d {
        let mut v_next = v.clone();
        let mut k = -(d as isize);
        while k <= d as isize {
            let idx = (k + offset) as usize;
            let mut x = if k == -(d as isize)
                || (k != d as isize && v[(k - 1 + offset) as usize] < v[(k + 1 + offset) as usize])
            {
                v[(k + 1 + offset) as usize]
            } else {
                v[(k - 1 + offset) as usize] + 1
            };
            let mut y = (x as isize - k) as usize;

            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }

            v_next[idx] = x;

            if x >= n && y >= m {
                trace.push(v_next);
                break 'outer;
            }
            k += 2;
        }
        trace.push(v_next.clone());
        v = v_next;
    }

    backtrack(&trace, n, m, offset)
}

fn backtrack(trace: &[Vec<usize>], n: usize, m: usize, offset: isize) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut x = n;
    let mut y = m;

    for d in (0..trace.len()).rev() {
        let k = x as isize - y as isize;

        let prev_k = if d == 0 {
            k
        } else if k == -(d as isize)
            || (k != d as isize
                && trace[d - 1][(k - 1 + offset) as usize] < trace[d - 1][(k + 1 + offset) as usize])
        {
            k + 1
        } else {
            k - 1
        };

        let prev_x = if d == 0 { 0 } else { trace[d - 1][(prev_k + offset) as usize] };
        let prev_y = (prev_x as isize - prev_k) as usize;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            ops.push(Operation::equal(x as u32, x as u32 + 1, y as u32, y as u32 + 1));
        }

        if d > 0 {
            if prev_k == k + 1 {
                y -= 1;
                ops.push(Operation::insert(y as u32, y as u32 + 1, x as u32));
            } else {
                x -= 1;
                ops.push(Operation::delete(x as u32, x as u32 + 1, y as u32));
            }
        }
    }

    ops.reverse();
    ops
}
