//! LCS primitives shared by the Myers, Patience and Histogram algorithms
//! (component C2, `spec.md` §4.2).

use crate::intern::Token;
use hashbrown::HashMap;

/// Computes the longest common subsequence of `a` and `b` via the classical
/// `O(|a|*|b|)` dynamic-programming table, returning matched index pairs in
/// increasing order.
///
/// Tie-breaking during backtrack prefers moving up (decreasing the `a`
/// index) when `dp[i-1][j] > dp[i][j-1]`, and moving left otherwise, per
/// `spec.md` §4.2.
pub fn compute_lcs(a: &[Token], b: &[Token]) -> Vec<(u32, u32)> {
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    let mut dp = vec![0u32; (n + 1) * (m + 1)];
    let row = m + 1;
    let at = |i: usize, j: usize| i * row + j;

    for i in 1..=n {
        for j in 1..=m {
            dp[at(i, j)] = if a[i - 1] == b[j - 1] {
                dp[at(i - 1, j - 1)] + 1
            } else {
                dp[at(i - 1, j)].max(dp[at(i, j - 1)])
            };
        }
    }

    let mut matches = Vec::new();
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            matches.push((i as u32 - 1, j as u32 - 1));
            i -= 1;
            j -= 1;
        } else if dp[at(i - 1, j)] > dp[at(i, j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    matches.reverse();
    matches
}

/// Finds lines that occur exactly once in `a_lines` and exactly once in
/// `b_lines`, returning the `(aIndex, bIndex)` pairs sorted by `aIndex`.
pub fn unique_line_matches(a_lines: &[Token], b_lines: &[Token]) -> Vec<(u32, u32)> {
    let mut a_counts: HashMap<Token, (u32, u32)> = HashMap::new();
    for (i, &tok) in a_lines.iter().enumerate() {
        let entry = a_counts.entry(tok).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = i as u32;
    }
    let mut b_counts: HashMap<Token, (u32, u32)> = HashMap::new();
    for (j, &tok) in b_lines.iter().enumerate() {
        let entry = b_counts.entry(tok).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = j as u32;
    }

    let mut matches = Vec::new();
    for (i, &tok) in a_lines.iter().enumerate() {
        if let (Some(&(ac, _)), Some(&(bc, bj))) = (a_counts.get(&tok), b_counts.get(&tok)) {
            if ac == 1 && bc == 1 {
                matches.push((i as u32, bj));
            }
        }
    }
    matches
}

/// Runs patience-sort longest-increasing-subsequence over the `bIndex`
/// coordinate of `matches` (which must already be sorted by `aIndex`
/// ascending), returning the chosen anchor chain in ascending order of both
/// coordinates.
pub fn patience_lis(matches: &[(u32, u32)]) -> Vec<(u32, u32)> {
    if matches.is_empty() {
        return Vec::new();
    }

    // `piles[p]` holds the index (into `matches`) of the current top of pile `p`.
    let mut piles: Vec<usize> = Vec::new();
    let mut back_pointers: Vec<Option<usize>> = vec![None; matches.len()];

    for (idx, &(_, b_index)) in matches.iter().enumerate() {
        let pile = piles.partition_point(|&top| matches[top].1 < b_index);
        if pile > 0 {
            back_pointers[idx] = Some(piles[pile - 1]);
        }
        if pile == piles.len() {
            piles.push(idx);
        } else {
            piles[pile] = idx;
        }
    }

    let mut chain = Vec::with_capacity(piles.len());
    let mut current = piles.last().copied();
    while let Some(idx) = current {
        chain.push(matches[idx]);
        current = back_pointers[idx];
    }
    chain.reverse();
    chain
}

/// Counts occurrences of each line in `lines`.
pub fn occurrence_counts(lines: &[Token]) -> HashMap<Token, u32> {
    let mut counts = HashMap::new();
    for &tok in lines {
        *counts.entry(tok).or_insert(0) += 1;
    }
    counts
}

/// Returns the lines present in both `a` and `b` whose combined occurrence
/// count is `<= max`, sorted ascending by combined count (stable on ties).
pub fn low_occurrence_lines(a: &[Token], b: &[Token], max: u32) -> Vec<Token> {
    let a_counts = occurrence_counts(a);
    let b_counts = occurrence_counts(b);

    let mut candidates: Vec<(u32, usize, Token)> = Vec::new();
    let mut seen = hashbrown::HashSet::new();
    for (order, &tok) in a.iter().enumerate() {
        if !seen.insert(tok) {
            continue;
        }
        if let Some(&bc) = b_counts.get(&tok) {
            let ac = a_counts[&tok];
            let combined = ac + bc;
            if combined <= max {
                candidates.push((combined, order, tok));
            }
        }
    }
    candidates.sort_by(|x, y| x.0.cmp(&y.0).then(x.1.cmp(&y.1)));
    candidates.into_iter().map(|(_, _, tok)| tok).collect()
}
