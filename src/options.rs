use std::path::PathBuf;

use crate::error::FinderError;

// ---------------------------------------------------------------------------
// Policy enums
// ---------------------------------------------------------------------------

/// How the pattern is compared against entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The name must contain the pattern literally.
    #[default]
    Substring,

    /// The name must match the pattern as an unanchored regular expression.
    Regex,
}

/// How matched paths are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// Relative to the search root. Paths that cannot be made relative are
    /// omitted.
    #[default]
    Relative,

    /// Joined from the listed directory and the entry name, as given.
    /// Absolute only when the root was.
    Joined,
}

/// Which hidden entries the walk skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiddenPolicy {
    /// Hidden directories are neither matched, reported, nor descended into.
    /// Hidden files are matched like any other file.
    #[default]
    PruneDirs,

    /// Like `PruneDirs`, and hidden files are never matched either.
    Exclude,

    /// Hidden entries are treated like any other.
    Include,
}

impl HiddenPolicy {
    pub(crate) fn prunes_dirs(self) -> bool {
        !matches!(self, Self::Include)
    }

    pub(crate) fn skips_files(self) -> bool {
        matches!(self, Self::Exclude)
    }
}

/// What the walk does when a directory cannot be opened or listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop every worker and fail the whole search with the first error.
    #[default]
    Abort,

    /// Skip the failing subtree, keep walking, and return the errors in
    /// [`Results::errors`](crate::Results::errors).
    Continue,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Search configuration, validated once before the walk starts.
#[derive(Debug, Clone)]
pub struct Options {
    /// Match non-directory entries.
    pub files: bool,

    /// Match directories.
    pub dirs: bool,

    pub mode: MatchMode,

    /// Compare names case-insensitively. Off by default.
    pub case_insensitive: bool,

    pub paths: PathStyle,

    /// Report the visited count and elapsed time after the walk.
    pub stats: bool,

    pub hidden: HiddenPolicy,

    pub on_error: ErrorPolicy,

    /// Size of the worker pool.
    pub threads: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            files:            true,
            dirs:             false,
            mode:             MatchMode::Substring,
            case_insensitive: false,
            paths:            PathStyle::Relative,
            stats:            false,
            hidden:           HiddenPolicy::PruneDirs,
            on_error:         ErrorPolicy::Abort,
            threads:          num_cpus(),
        }
    }
}

impl Options {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), FinderError> {
        if !self.files && !self.dirs {
            return Err(FinderError::NoKindSelected);
        }
        self.validate_threads()
    }

    /// The subset that still applies when a custom matcher replaces the
    /// kind gate.
    pub(crate) fn validate_threads(&self) -> Result<(), FinderError> {
        if self.threads == 0 {
            return Err(FinderError::InvalidThreadCount(self.threads));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SearchRequest
// ---------------------------------------------------------------------------

/// Where to search and what to look for.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub root:    PathBuf,
    pub pattern: String,
}

impl SearchRequest {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root:    root.into(),
            pattern: pattern.into(),
        }
    }

    /// Both fields must be non-empty. Existence of the root is checked by
    /// the engine.
    pub fn validate(&self) -> Result<(), FinderError> {
        if self.root.as_os_str().is_empty() {
            return Err(FinderError::EmptyRoot);
        }
        if self.pattern.is_empty() {
            return Err(FinderError::EmptyPattern);
        }
        Ok(())
    }
}

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
