//! # parfind
//!
//! Parallel name search over directory trees.
//!
//! parfind walks a directory tree on a bounded pool of worker threads,
//! tests every entry's name against a literal substring or an unanchored
//! regular expression, and hands each match to a [`Reporter`] as soon as it
//! is found. Hidden directories are pruned by default; see [`HiddenPolicy`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parfind::CollectingReporter;
//!
//! let reporter = CollectingReporter::new();
//! let results = parfind::search()
//!     .root("/srv/invoices")
//!     .matching("invoice")
//!     .stats(true)
//!     .run_with(&reporter)
//!     .unwrap();
//!
//! for path in reporter.sorted_paths() {
//!     println!("{}", path.display());
//! }
//! println!("Visited {} entries in {:.3}s",
//!     results.stats.visited,
//!     results.stats.duration.as_secs_f64()
//! );
//! ```
//!
//! # Custom Matchers and Reporters
//!
//! Implement [`Matcher`] to replace the built-in name test:
//!
//! ```rust
//! use parfind::{Matcher, Entry};
//!
//! struct ExtensionMatcher(String);
//!
//! impl Matcher for ExtensionMatcher {
//!     fn is_match(&self, entry: &Entry) -> bool {
//!         entry.path
//!             .extension()
//!             .map(|e| e.eq_ignore_ascii_case(&self.0))
//!             .unwrap_or(false)
//!     }
//! }
//! ```
//!
//! Implement [`Reporter`] to route matches somewhere other than stdout.
//! Workers call it concurrently, one call per match.

#![forbid(unsafe_code)]

#[cfg(feature = "cli")]
pub mod config;
pub mod engine;

mod builder;
mod entry;
mod error;
mod matcher;
mod options;
mod reporter;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use engine::{find, find_matching};
pub use entry::{is_hidden, Entry, EntryKind};
pub use error::FinderError;
pub use matcher::NameMatcher;
pub use options::{ErrorPolicy, HiddenPolicy, MatchMode, Options, PathStyle, SearchRequest};
pub use reporter::{render_path, CollectingReporter, ConsoleReporter};
pub use results::{Results, ScanStats};
pub use traits::{Matcher, Reporter};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
///
/// # Example
///
/// ```rust,no_run
/// let results = parfind::search()
///     .root(".")
///     .matching(r"\.rs$")
///     .regex(true)
///     .run()
///     .unwrap();
///
/// eprintln!("{} matches", results.matches);
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
