//! Engine configuration (`spec.md` §6).
//!
//! `DiffOptions` is a plain data struct; there is no file- or env-driven
//! config layer behind it, matching the teacher's own `Algorithm` being a
//! value selected directly rather than looked up from configuration.

use serde::{Deserialize, Serialize};

use crate::error::DiffError;
use crate::line::WhitespaceRule;
use crate::segment::Granularity as SegmentGranularity;

/// The line-diff algorithm selected by [`DiffOptions::algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Myers,
    Patience,
    Histogram,
}

impl Algorithm {
    /// Parses one of the three option spellings from `spec.md` §6,
    /// rejecting anything else (`spec.md` §7: invalid algorithm name).
    pub fn parse(name: &str) -> Result<Algorithm, DiffError> {
        match name {
            "myers" => Ok(Algorithm::Myers),
            "patience" => Ok(Algorithm::Patience),
            "histogram" => Ok(Algorithm::Histogram),
            other => Err(DiffError::InvalidAlgorithm(other.to_string())),
        }
    }
}

/// The tokenization granularity (`spec.md` §6): the core itself only ever
/// compares whole lines (`Line`); `Word`/`Char` are consulted solely by the
/// intra-line segmenter (C7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Line,
    Word,
    Char,
}

impl Granularity {
    /// The segmenter granularity to use for intra-line refinement, or
    /// `None` when this option is set to whole-line comparison.
    pub fn to_segment_granularity(self) -> Option<SegmentGranularity> {
        match self {
            Granularity::Line => None,
            Granularity::Word => Some(SegmentGranularity::Word),
            Granularity::Char => Some(SegmentGranularity::Char),
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Line
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Myers
    }
}

/// The full set of engine options from `spec.md` §6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    pub algorithm: Algorithm,
    pub granularity: Granularity,
    pub context: u32,
    pub ignore_whitespace: WhitespaceRule,
    pub ignore_case: bool,
    pub trim_lines: bool,
    pub ignore_blank_lines: bool,
    /// Pass-through for the (out-of-scope) rendering collaborator; the core
    /// never reads this field itself.
    pub theme: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            algorithm: Algorithm::default(),
            granularity: Granularity::default(),
            context: 3,
            ignore_whitespace: WhitespaceRule::default(),
            ignore_case: false,
            trim_lines: false,
            ignore_blank_lines: false,
            theme: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_parse_rejects_unknown_names() {
        assert_eq!(Algorithm::parse("myers"), Ok(Algorithm::Myers));
        assert!(Algorithm::parse("bogus").is_err());
    }

    #[test]
    fn default_options_match_spec_defaults() {
        let opts = DiffOptions::default();
        assert_eq!(opts.context, 3);
        assert_eq!(opts.granularity, Granularity::Line);
        assert_eq!(opts.granularity.to_segment_granularity(), None);
    }
}
