//! End-to-end coverage of the universal invariants and concrete scenarios
//! from `spec.md` §8, driven entirely through the public `Engine` API.

use diffcore::{Algorithm, ChangeKind, Engine};
use expect_test::expect;

fn hunks_for(old: &str, new: &str, algorithm: Algorithm) -> Vec<diffcore::Hunk> {
    let mut engine = Engine::new();
    match algorithm {
        Algorithm::Myers => engine.set_algorithm("myers").unwrap(),
        Algorithm::Patience => engine.set_algorithm("patience").unwrap(),
        Algorithm::Histogram => engine.set_algorithm("histogram").unwrap(),
    };
    engine.diff(old, new).unwrap().hunks
}

// Invariant 1: identity.
#[test]
fn identity_yields_zero_changes_for_every_algorithm() {
    let text = "one\ntwo\nthree\nfour";
    for algorithm in [Algorithm::Myers, Algorithm::Patience, Algorithm::Histogram] {
        let mut engine = Engine::new();
        engine.set_algorithm(match algorithm {
            Algorithm::Myers => "myers",
            Algorithm::Patience => "patience",
            Algorithm::Histogram => "histogram",
        }).unwrap();
        let result = engine.diff(text, text).unwrap();
        assert!(result.hunks.is_empty());
        assert_eq!(result.stats.additions, 0);
        assert_eq!(result.stats.deletions, 0);
        assert_eq!(result.stats.old_line_count, result.stats.new_line_count);
        assert_eq!(result.stats.old_line_count, 4);
    }
}

// Invariant 2: coverage.
#[test]
fn hunk_line_counts_match_change_kind_tallies() {
    let mut engine = Engine::new();
    let result = engine.diff("a\nb\nc\nd\ne", "a\nB\nc\nD\ne").unwrap();
    for hunk in &result.hunks {
        let normal = hunk.changes.iter().filter(|c| c.kind == ChangeKind::Normal).count() as u32;
        let add = hunk.changes.iter().filter(|c| c.kind == ChangeKind::Add).count() as u32;
        let delete = hunk.changes.iter().filter(|c| c.kind == ChangeKind::Delete).count() as u32;
        assert_eq!(hunk.old_lines, normal + delete);
        assert_eq!(hunk.new_lines, normal + add);
    }
}

// Invariant 3: monotone line numbers.
#[test]
fn line_numbers_are_strictly_increasing_across_hunks() {
    let mut engine = Engine::new();
    let result = engine.diff(
        "1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n11\n12\n13\n14\n15",
        "1\n2\nX\n4\n5\n6\n7\n8\n9\n10\n11\n12\nY\n14\n15",
    ).unwrap();

    let mut last_old = 0;
    let mut last_new = 0;
    for change in result.hunks.iter().flat_map(|h| &h.changes) {
        if let Some(n) = change.old_line_number {
            assert!(n > last_old);
            last_old = n;
        }
        if let Some(n) = change.new_line_number {
            assert!(n > last_new);
            last_new = n;
        }
    }
}

// Invariant 4: reconstructibility.
#[test]
fn deletes_and_adds_reconstruct_new_from_old() {
    let old_lines = ["a", "b", "c", "d", "e"];
    let new_lines = ["a", "x", "c", "y", "e"];
    let mut engine = Engine::new();
    let result = engine.diff(&old_lines.join("\n"), &new_lines.join("\n")).unwrap();

    let mut reconstructed: Vec<(u32, &str)> = Vec::new();
    for hunk in &result.hunks {
        for change in &hunk.changes {
            if change.kind != ChangeKind::Delete {
                reconstructed.push((change.new_line_number.unwrap(), change.content.as_str()));
            }
        }
    }
    // Lines outside any hunk are unchanged context shared by both sides;
    // reconstructed only covers what the hunks actually touched/retained.
    reconstructed.sort_by_key(|(n, _)| *n);
    for (n, content) in reconstructed {
        assert_eq!(new_lines[n as usize - 1], content);
    }
}

// Invariant 8 / scenario 4 companion: normalization stability.
#[test]
fn ignore_whitespace_all_is_stable_under_pure_whitespace_edits() {
    let mut engine = Engine::new();
    engine.set_ignore_whitespace(diffcore::WhitespaceRule::All);
    let result = engine.diff("foo(a, b)\nbar( c )", "foo(a,b)\nbar(c)").unwrap();
    assert!(result.hunks.is_empty());
}

// Invariant 7: Histogram depth safety.
#[test]
fn histogram_completes_on_a_large_mostly_unique_scattered_edit_corpus() {
    let lines = 10_000;
    let old: Vec<String> = (0..lines).map(|i| format!("line number {i} with unique filler")).collect();
    let new: Vec<String> = (0..lines)
        .map(|i| {
            if i % 10 == 0 {
                format!("line number {i} CHANGED")
            } else {
                format!("line number {i} with unique filler")
            }
        })
        .collect();

    let mut engine = Engine::new();
    engine.set_algorithm("histogram").unwrap();
    let result = engine.diff(&old.join("\n"), &new.join("\n")).unwrap();
    assert_eq!(result.stats.old_line_count, lines as u32);
    assert!(result.stats.changes > 0);
}

// Scenario 1.
#[test]
fn scenario_identical_three_lines() {
    let mut engine = Engine::new();
    let result = engine.diff("a\nb\nc", "a\nb\nc").unwrap();
    assert!(result.hunks.is_empty());
    assert_eq!(result.stats.additions, 0);
    assert_eq!(result.stats.deletions, 0);
    assert_eq!(result.stats.changes, 0);
    assert_eq!(result.stats.old_line_count, 3);
    assert_eq!(result.stats.new_line_count, 3);
}

// Scenario 2.
#[test]
fn scenario_pure_insertion_from_empty() {
    let mut engine = Engine::new();
    let result = engine.diff("", "x\ny").unwrap();
    assert_eq!(result.hunks.len(), 1);
    assert_eq!(result.hunks[0].header, "@@ -0,0 +1,2 @@");
    let kinds: Vec<_> = result.hunks[0].changes.iter().map(|c| (c.kind, c.content.as_str())).collect();
    assert_eq!(kinds, vec![(ChangeKind::Add, "x"), (ChangeKind::Add, "y")]);
    assert_eq!(result.stats.additions, 2);
}

// Scenario 3.
#[test]
fn scenario_single_line_change_with_full_context() {
    let hunks = hunks_for("a\nb\nc\nd\ne", "a\nb\nx\nd\ne", Algorithm::Myers);
    assert_eq!(hunks.len(), 1);
    assert_eq!(hunks[0].header, "@@ -1,5 +1,5 @@");
    let kinds: Vec<_> = hunks[0].changes.iter().map(|c| (c.kind, c.content.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (ChangeKind::Normal, "a"),
            (ChangeKind::Normal, "b"),
            (ChangeKind::Delete, "c"),
            (ChangeKind::Add, "x"),
            (ChangeKind::Normal, "d"),
            (ChangeKind::Normal, "e"),
        ]
    );
}

// Scenario 4.
#[test]
fn scenario_blank_line_suppressed_only_with_flag() {
    let mut with_flag = Engine::new();
    with_flag.set_ignore_blank_lines(true);
    assert!(with_flag.diff("A\n\nB", "A\nB").unwrap().hunks.is_empty());

    let mut without_flag = Engine::new();
    let result = without_flag.diff("A\n\nB", "A\nB").unwrap();
    assert!(!result.hunks.is_empty());
    assert!(result.hunks.iter().flat_map(|h| &h.changes).any(|c| c.kind == ChangeKind::Delete));
}

// Scenario 5.
#[test]
fn scenario_patience_anchors_on_unique_lines_not_duplicates() {
    let old = "x\ndup\ny\ndup\nz";
    let new = "y\ndup\nx\ndup\nz";
    let hunks = hunks_for(old, new, Algorithm::Patience);
    let equal_contents: Vec<&str> = hunks
        .iter()
        .flat_map(|h| &h.changes)
        .filter(|c| c.kind == ChangeKind::Normal)
        .map(|c| c.content.as_str())
        .collect();
    // `dup` must never be the sole anchor distinguishing the two orderings.
    let unique_anchor_count = equal_contents.iter().filter(|&&c| c == "x" || c == "y").count();
    assert!(unique_anchor_count <= 1);
}

// Scenario 6.
#[test]
fn scenario_histogram_anchors_on_rare_marker_among_repeats() {
    let old = "R\nR\nMARKER\nR\nR";
    let new = "R\nR\nMARKER\nR\nR\nR";
    let hunks = hunks_for(old, new, Algorithm::Histogram);
    let marker_is_normal = hunks
        .iter()
        .flat_map(|h| &h.changes)
        .any(|c| c.kind == ChangeKind::Normal && c.content == "MARKER");
    assert!(marker_is_normal);
}

#[test]
fn unified_string_matches_expected_snapshot() {
    let mut engine = Engine::new();
    let result = engine.diff("a\nb\nc\nd\ne", "a\nb\nx\nd\ne").unwrap();
    expect![[r#"
        @@ -1,5 +1,5 @@
         a
         b
        -c
        +x
         d
         e
    "#]]
    .assert_eq(&result.to_unified_string());
}
