//! Plugin hooks (`spec.md` §4.8, §5, §6).
//!
//! A plugin is a named pair of optional pure hooks run around the diff:
//! `onBeforeDiff` rewrites each input text independently, `onAfterDiff` may
//! wrap or replace the finished result. Hooks run strictly in registration
//! order (`spec.md` §5); `onAfterDiff` chains, feeding hook k's output into
//! hook k+1. This core carries no plugin *registry* — just the ordered
//! `Vec<Box<dyn Plugin>>` the engine holds.

use crate::error::DiffError;
use crate::result::DiffResult;

/// An ordered diff-pipeline hook.
///
/// Both methods default to the identity transform, so a plugin that only
/// cares about one side of the pipeline need implement just that one.
pub trait Plugin {
    /// A short name used in [`DiffError::Plugin`] when this plugin fails.
    fn name(&self) -> &str;

    /// Rewrites one input text before diffing. Called once per input.
    fn on_before_diff(&self, text: String) -> Result<String, DiffError> {
        Ok(text)
    }

    /// Wraps or replaces the finished result.
    fn on_after_diff(&self, result: DiffResult) -> Result<DiffResult, DiffError> {
        Ok(result)
    }
}

pub(crate) fn run_before(plugins: &[Box<dyn Plugin>], text: String) -> Result<String, DiffError> {
    plugins
        .iter()
        .try_fold(text, |acc, plugin| wrap(plugin, plugin.on_before_diff(acc)))
}

pub(crate) fn run_after(
    plugins: &[Box<dyn Plugin>],
    result: DiffResult,
) -> Result<DiffResult, DiffError> {
    plugins
        .iter()
        .try_fold(result, |acc, plugin| wrap(plugin, plugin.on_after_diff(acc)))
}

fn wrap<T>(plugin: &dyn Plugin, outcome: Result<T, DiffError>) -> Result<T, DiffError> {
    outcome.map_err(|err| match err {
        DiffError::Plugin { .. } => err,
        other => DiffError::Plugin { plugin: plugin.name().to_string(), message: other.to_string() },
    })
}
