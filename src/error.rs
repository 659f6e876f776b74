//! The closed error surface of the diff core (`spec.md` §7).

use thiserror::Error;

/// Errors the engine can report.
///
/// Per `spec.md` §7 this surface is deliberately small: an unknown
/// whitespace rule is tolerated rather than rejected, and a Histogram
/// depth-limit fallback is never surfaced as an error at all.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DiffError {
    /// `Engine::set_algorithm` was given a name other than `myers`,
    /// `patience`, or `histogram`.
    #[error("unknown diff algorithm: {0}")]
    InvalidAlgorithm(String),

    /// A blank-line index map did not cover an index the assembler asked it
    /// to translate. A fatal internal invariant violation per `spec.md` §7;
    /// must not occur on well-formed inputs.
    #[error("index {index} is out of bounds for index map of length {map_len}")]
    IndexMapViolation { index: u32, map_len: u32 },

    /// A plugin's `onBeforeDiff`/`onAfterDiff` hook failed. Propagated to
    /// the caller unchanged; the engine attempts no recovery.
    #[error("plugin '{plugin}' failed: {message}")]
    Plugin { plugin: String, message: String },
}
