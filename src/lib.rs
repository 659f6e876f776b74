//! `diffcore` is the computational core of a text-diffing library: given two
//! blobs of text, it produces a minimal (or near-minimal) edit script and
//! assembles it into hunks suitable for unified-diff rendering.
//!
//! Three interchangeable line-diff algorithms are provided — [`Algorithm::Myers`]
//! (classic `O(ND)`), [`Algorithm::Patience`] (unique-anchor LCS), and
//! [`Algorithm::Histogram`] (low-occurrence anchor recursion, git's default) —
//! selected on an [`Engine`] and dispatched by value, not by inheritance.
//!
//! ```
//! use diffcore::Engine;
//!
//! let mut engine = Engine::new();
//! let result = engine.diff("a\nb\nc", "a\nx\nc").unwrap();
//! assert_eq!(result.hunks.len(), 1);
//! assert_eq!(result.stats.additions, 1);
//! assert_eq!(result.stats.deletions, 1);
//! ```
//!
//! Rendering (HTML, syntax highlighting, themes) and a plugin *registry* are
//! out of scope for this core; the only contract with those collaborators is
//! the [`Plugin`] hook pair and the option flags on [`DiffOptions`].

pub mod error;
pub mod hunk;
pub mod intern;
pub mod lcs;
pub mod line;
pub mod options;
pub mod plugin;
pub mod result;
pub mod segment;
#[cfg(feature = "unified_diff")]
pub mod unified;

mod histogram;
mod myers;
mod operation;
mod patience;
mod util;

pub use error::DiffError;
pub use hunk::{Change, ChangeKind, Hunk};
pub use intern::{Interner, Token};
pub use line::WhitespaceRule;
pub use options::{Algorithm, DiffOptions, Granularity};
pub use plugin::Plugin;
pub use result::{DiffResult, DiffStats};
pub use segment::{segment_line_pair, Segment, SegmentKind};

/// Orchestrates the full diff pipeline: plugin hooks, normalization,
/// algorithm dispatch, hunk assembly, and statistics (`spec.md` §4.8).
///
/// `diff` takes `&mut self` only because plugin registration mutates engine
/// state; the computation itself borrows the plugin list immutably and
/// allocates no state shared across calls. Distinct `Engine` instances are
/// fully independent and may run concurrently (`spec.md` §5).
#[derive(Default)]
pub struct Engine {
    options: DiffOptions,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Engine {
    /// Creates an engine with default options (`spec.md` §6) and no plugins.
    pub fn new() -> Self {
        Engine::default()
    }

    /// Selects the diff algorithm by name (`myers`, `patience`, or
    /// `histogram`), rejecting anything else (`spec.md` §7).
    pub fn set_algorithm(&mut self, name: &str) -> Result<&mut Self, DiffError> {
        self.options.algorithm = Algorithm::parse(name)?;
        Ok(self)
    }

    /// Selects the intra-line segmenter granularity. Unlike the algorithm
    /// name, this takes the enum directly rather than a string: the option
    /// table's string spellings (`spec.md` §6) exist for the external
    /// (non-Rust) collaborator, and the enum here is already exhaustive.
    pub fn set_granularity(&mut self, granularity: Granularity) -> &mut Self {
        self.options.granularity = granularity;
        self
    }

    /// Sets the hunk context radius (`spec.md` §6, default 3).
    pub fn set_context(&mut self, context: u32) -> &mut Self {
        self.options.context = context;
        self
    }

    /// Sets the whitespace-handling rule applied during normalization.
    pub fn set_ignore_whitespace(&mut self, rule: WhitespaceRule) -> &mut Self {
        self.options.ignore_whitespace = rule;
        self
    }

    /// Enables or disables case folding during normalization.
    pub fn set_ignore_case(&mut self, ignore_case: bool) -> &mut Self {
        self.options.ignore_case = ignore_case;
        self
    }

    /// Enables or disables per-line trimming (active only when the
    /// whitespace rule is `off`, per `spec.md` §4.1).
    pub fn set_trim_lines(&mut self, trim_lines: bool) -> &mut Self {
        self.options.trim_lines = trim_lines;
        self
    }

    /// Enables or disables blank-line filtering with index-map reindexing.
    pub fn set_ignore_blank_lines(&mut self, ignore_blank_lines: bool) -> &mut Self {
        self.options.ignore_blank_lines = ignore_blank_lines;
        self
    }

    /// Stores a pass-through theme name for the (out-of-scope) rendering
    /// collaborator; this core never reads it back.
    pub fn set_theme(&mut self, theme: impl Into<String>) -> &mut Self {
        self.options.theme = theme.into();
        self
    }

    /// Registers a plugin. Hooks run in registration order (`spec.md` §5).
    pub fn use_plugin(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Computes the diff between `old_text` and `new_text` per `spec.md` §4.8.
    pub fn diff(&mut self, old_text: &str, new_text: &str) -> Result<DiffResult, DiffError> {
        let old_text = plugin::run_before(&self.plugins, old_text.to_string())?;
        let new_text = plugin::run_before(&self.plugins, new_text.to_string())?;

        let old_display = line::display_lines(&old_text);
        let new_display = line::display_lines(&new_text);

        let old_normalized: Vec<String> = old_display
            .iter()
            .map(|l| line::normalize_line(l, self.options.ignore_whitespace, self.options.trim_lines, self.options.ignore_case))
            .collect();
        let new_normalized: Vec<String> = new_display
            .iter()
            .map(|l| line::normalize_line(l, self.options.ignore_whitespace, self.options.trim_lines, self.options.ignore_case))
            .collect();

        let (old_cmp, old_index_map) = if self.options.ignore_blank_lines {
            let (filtered, map) = line::filter_blank_lines(&old_normalized);
            (filtered, Some(map))
        } else {
            (old_normalized, None)
        };
        let (new_cmp, new_index_map) = if self.options.ignore_blank_lines {
            let (filtered, map) = line::filter_blank_lines(&new_normalized);
            (filtered, Some(map))
        } else {
            (new_normalized, None)
        };

        let mut interner = Interner::new(old_cmp.len() + new_cmp.len());
        let old_tokens: Vec<Token> = old_cmp.iter().map(|l| interner.intern(l.clone())).collect();
        let new_tokens: Vec<Token> = new_cmp.iter().map(|l| interner.intern(l.clone())).collect();

        let ops = match self.options.algorithm {
            Algorithm::Myers => myers::diff(&old_tokens, &new_tokens),
            Algorithm::Patience => patience::diff(&old_tokens, &new_tokens),
            Algorithm::Histogram => histogram::diff(&old_tokens, &new_tokens, interner.num_tokens()),
        };

        validate_operations(&ops, old_cmp.len() as u32, new_cmp.len() as u32)?;

        let hunks = hunk::assemble(
            &ops,
            &old_display,
            &new_display,
            old_index_map.as_deref(),
            new_index_map.as_deref(),
            self.options.context,
        );

        let additions = hunks.iter().flat_map(|h| &h.changes).filter(|c| c.kind == ChangeKind::Add).count() as u32;
        let deletions = hunks.iter().flat_map(|h| &h.changes).filter(|c| c.kind == ChangeKind::Delete).count() as u32;
        let stats = DiffStats {
            additions,
            deletions,
            changes: additions + deletions,
            old_line_count: old_display.len() as u32,
            new_line_count: new_display.len() as u32,
        };

        let result = DiffResult {
            hunks,
            stats,
            old_content: old_text,
            new_content: new_text,
            options: self.options.clone(),
        };

        plugin::run_after(&self.plugins, result)
    }
}

/// Confirms every operation's ranges fall within the comparison-space
/// sequences the algorithm actually ran on. A violation here means an
/// algorithm produced out-of-bounds indices — the fatal internal invariant
/// violation `spec.md` §7 describes, which "must not occur on well-formed
/// inputs".
fn validate_operations(ops: &[operation::Operation], old_len: u32, new_len: u32) -> Result<(), DiffError> {
    for op in ops {
        if op.old_end > old_len {
            return Err(DiffError::IndexMapViolation { index: op.old_end, map_len: old_len });
        }
        if op.new_end > new_len {
            return Err(DiffError::IndexMapViolation { index: op.new_end, map_len: new_len });
        }
    }
    Ok(())
}
