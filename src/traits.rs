use std::path::Path;

use crate::entry::{Entry, EntryKind};
use crate::results::Results;

/// Determines whether an entry is a match.
///
/// # Thread Safety
///
/// `Send + Sync` are required — matchers are shared across worker threads
/// and called concurrently on different entries.
///
/// # Example
///
/// ```rust
/// use parfind::{Matcher, Entry};
///
/// struct ExtensionMatcher(String);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.path
///             .extension()
///             .map(|e| e.eq_ignore_ascii_case(&self.0))
///             .unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be reported.
    fn is_match(&self, entry: &Entry) -> bool;
}

/// Receives matched paths while the walk runs, and the summary afterwards.
///
/// Workers call [`report`](Reporter::report) concurrently. Implementations
/// must emit each report as one indivisible unit so lines from different
/// workers never interleave.
pub trait Reporter: Send + Sync {
    /// Render one match. `path` is already rendered per
    /// [`PathStyle`](crate::PathStyle).
    fn report(&self, path: &Path, kind: EntryKind);

    /// Render the end-of-search statistics. Only called when statistics were
    /// requested and the search was not aborted.
    fn summarize(&self, results: &Results);
}
