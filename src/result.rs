//! The diff result data model (`spec.md` §3).
//!
//! `DiffResult` is an immutable snapshot: the pipeline owns all intermediate
//! arrays, and once returned, a result carries no further connection to the
//! engine that produced it.

use serde::{Deserialize, Serialize};

use crate::hunk::Hunk;
use crate::options::DiffOptions;

/// Summary counts over a completed diff (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub additions: u32,
    pub deletions: u32,
    /// Always `additions + deletions`.
    pub changes: u32,
    pub old_line_count: u32,
    pub new_line_count: u32,
}

/// The immutable result of a completed diff.
///
/// `toHTML` from `spec.md` §3 is deliberately not implemented: HTML
/// rendering is an out-of-scope external collaborator (`spec.md` §1), so
/// this core carries no render target for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult {
    pub hunks: Vec<Hunk>,
    pub stats: DiffStats,
    pub old_content: String,
    pub new_content: String,
    pub options: DiffOptions,
}

/// The wire shape from `spec.md` §6: `{ hunks, stats, options }`, strictly
/// data. `oldContent`/`newContent` are part of the in-memory `DiffResult`
/// but are deliberately excluded from the JSON projection.
#[derive(Serialize)]
struct DiffResultJson<'a> {
    hunks: &'a [Hunk],
    stats: &'a DiffStats,
    options: &'a DiffOptions,
}

impl DiffResult {
    /// Renders this result as the unified-diff text format from `spec.md`
    /// §6. See [`crate::unified::to_unified_string`] for the exact shape.
    #[cfg(feature = "unified_diff")]
    pub fn to_unified_string(&self) -> String {
        crate::unified::to_unified_string(&self.hunks)
    }

    /// Serializes the `{ hunks, stats, options }` JSON shape from
    /// `spec.md` §6.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        let projection = DiffResultJson { hunks: &self.hunks, stats: &self.stats, options: &self.options };
        serde_json::to_string(&projection)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::options::DiffOptions;

    #[test]
    fn to_json_omits_old_and_new_content() {
        let result = DiffResult {
            hunks: Vec::new(),
            stats: DiffStats { additions: 0, deletions: 0, changes: 0, old_line_count: 1, new_line_count: 1 },
            old_content: "secret old text".to_string(),
            new_content: "secret new text".to_string(),
            options: DiffOptions::default(),
        };
        let json = result.to_json().unwrap();
        assert!(json.contains("\"hunks\""));
        assert!(json.contains("\"stats\""));
        assert!(json.contains("\"options\""));
        assert!(!json.contains("secret"));
    }
}
