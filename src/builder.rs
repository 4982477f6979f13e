use std::path::PathBuf;

use crate::engine::{find, find_matching};
use crate::error::FinderError;
use crate::options::{ErrorPolicy, HiddenPolicy, MatchMode, Options, PathStyle, SearchRequest};
use crate::reporter::ConsoleReporter;
use crate::results::Results;
use crate::traits::{Matcher, Reporter};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`parfind::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to print matches
/// to stdout, or [`run_with()`](SearchBuilder::run_with) to send them to
/// your own [`Reporter`].
///
/// # Example
///
/// ```rust,ignore
/// let results = parfind::search()
///     .root("/srv/data")
///     .matching(r"^invoice_\d+")
///     .regex(true)
///     .dirs(true)
///     .threads(8)
///     .run()?;
/// ```
pub struct SearchBuilder {
    root:    Option<PathBuf>,
    pattern: Option<String>,
    matcher: Option<Box<dyn Matcher>>,
    options: Options,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            root:    None,
            pattern: None,
            matcher: None,
            options: Options::default(),
        }
    }
}

impl SearchBuilder {
    // ── Request ───────────────────────────────────────────────────────────

    /// Directory to search. Required.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Pattern to look for in entry names. Required unless a custom matcher
    /// is set with [`with_matcher`](SearchBuilder::with_matcher).
    ///
    /// A literal substring by default; see [`regex`](SearchBuilder::regex).
    pub fn matching(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Replace the built-in kind gate and name test with a custom matcher.
    ///
    /// The pattern and the `files`/`dirs`/`regex`/`ignore_case` settings
    /// are then unused; hidden-entry handling still applies.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Match non-directory entries. On by default.
    pub fn files(mut self, yes: bool) -> Self {
        self.options.files = yes;
        self
    }

    /// Match directories. Off by default.
    pub fn dirs(mut self, yes: bool) -> Self {
        self.options.dirs = yes;
        self
    }

    /// Treat the pattern as an unanchored regular expression.
    pub fn regex(mut self, yes: bool) -> Self {
        self.options.mode = if yes { MatchMode::Regex } else { MatchMode::Substring };
        self
    }

    /// Compare names case-insensitively.
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.options.case_insensitive = yes;
        self
    }

    /// Render paths joined onto the root as given instead of relative to it.
    pub fn absolute(mut self, yes: bool) -> Self {
        self.options.paths = if yes { PathStyle::Joined } else { PathStyle::Relative };
        self
    }

    /// Report visited count and elapsed time once the search completes.
    pub fn stats(mut self, yes: bool) -> Self {
        self.options.stats = yes;
        self
    }

    pub fn hidden(mut self, policy: HiddenPolicy) -> Self {
        self.options.hidden = policy;
        self
    }

    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.options.on_error = policy;
        self
    }

    /// Number of worker threads. Defaults to the logical CPU count.
    pub fn threads(mut self, n: usize) -> Self {
        self.options.threads = n;
        self
    }

    /// Replace every option at once.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the search, printing matches to stdout.
    ///
    /// # Errors
    ///
    /// See [`find`](crate::find).
    pub fn run(self) -> Result<Results, FinderError> {
        self.run_with(&ConsoleReporter)
    }

    /// Execute the search, sending matches to `reporter`.
    pub fn run_with(self, reporter: &dyn Reporter) -> Result<Results, FinderError> {
        let root = self.root.unwrap_or_default();

        match self.matcher {
            Some(m) => find_matching(&root, &self.options, m.as_ref(), reporter),
            None => {
                let request = SearchRequest::new(root, self.pattern.unwrap_or_default());
                find(&request, &self.options, reporter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;

    #[test]
    fn missing_root_is_invalid_input() {
        let err = SearchBuilder::default()
            .matching("a")
            .run_with(&CollectingReporter::new())
            .unwrap_err();
        assert!(matches!(err, FinderError::EmptyRoot));
    }

    #[test]
    fn missing_pattern_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchBuilder::default()
            .root(dir.path())
            .run_with(&CollectingReporter::new())
            .unwrap_err();
        assert!(matches!(err, FinderError::EmptyPattern));
    }

    #[test]
    fn setters_map_onto_options() {
        let b = SearchBuilder::default()
            .dirs(true)
            .regex(true)
            .absolute(true)
            .hidden(HiddenPolicy::Include)
            .on_error(ErrorPolicy::Continue)
            .threads(3);
        assert!(b.options.files && b.options.dirs);
        assert_eq!(b.options.mode, MatchMode::Regex);
        assert_eq!(b.options.paths, PathStyle::Joined);
        assert_eq!(b.options.hidden, HiddenPolicy::Include);
        assert_eq!(b.options.on_error, ErrorPolicy::Continue);
        assert_eq!(b.options.threads, 3);
    }
}
