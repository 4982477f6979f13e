use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use colored::Colorize;

use crate::entry::EntryKind;
use crate::options::PathStyle;
use crate::results::{Results, ScanStats};
use crate::traits::Reporter;

/// Render a matched path for output.
///
/// Returns `None` when a relative rendering was requested and `path` does
/// not live under `root`; callers drop such lines.
pub fn render_path(root: &Path, path: &Path, style: PathStyle) -> Option<PathBuf> {
    match style {
        PathStyle::Joined   => Some(path.to_path_buf()),
        PathStyle::Relative => path.strip_prefix(root).ok().map(Path::to_path_buf),
    }
}

// ---------------------------------------------------------------------------
// ConsoleReporter
// ---------------------------------------------------------------------------

/// Writes one colored line per match to stdout: directories blue, everything
/// else green. The summary line is yellow.
///
/// Each line is written while holding the stdout lock, so concurrent workers
/// never produce interleaved partial lines. Write failures (a closed pipe,
/// typically) are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, path: &Path, kind: EntryKind) {
        let text = path.display().to_string();
        let line = match kind {
            EntryKind::Dir => text.blue(),
            _              => text.green(),
        };
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }

    fn summarize(&self, results: &Results) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", summary_line(&results.stats).yellow());
        if results.is_partial() {
            let skipped = format!("{} directories could not be read", results.errors.len());
            let _ = writeln!(out, "{}", skipped.red());
        }
        let _ = out.flush();
    }
}

/// The uncolored statistics line.
fn summary_line(stats: &ScanStats) -> String {
    format!(
        "Files browsed {}, search duration : {:?} ({} entries/s)",
        stats.visited, stats.duration, stats.entries_per_sec
    )
}

// ---------------------------------------------------------------------------
// CollectingReporter
// ---------------------------------------------------------------------------

/// Keeps matches in memory instead of printing them. For embedding callers
/// that want the paths themselves.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    matches: Mutex<Vec<(PathBuf, EntryKind)>>,
    summary: Mutex<Option<ScanStats>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matched paths with their kinds, in the order workers reported them.
    pub fn matches(&self) -> Vec<(PathBuf, EntryKind)> {
        self.matches.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Matched paths only, sorted.
    pub fn sorted_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.matches().into_iter().map(|(p, _)| p).collect();
        paths.sort();
        paths
    }

    /// The statistics passed to [`Reporter::summarize`], if it was called.
    pub fn summary(&self) -> Option<ScanStats> {
        self.summary.lock().ok().and_then(|s| *s)
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, path: &Path, kind: EntryKind) {
        if let Ok(mut m) = self.matches.lock() {
            m.push((path.to_path_buf(), kind));
        }
    }

    fn summarize(&self, results: &Results) {
        if let Ok(mut s) = self.summary.lock() {
            *s = Some(results.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_strips_root() {
        let rendered = render_path(Path::new("/srv/root"), Path::new("/srv/root/b/a.txt"), PathStyle::Relative);
        assert_eq!(rendered, Some(PathBuf::from("b/a.txt")));
    }

    #[test]
    fn relative_outside_root_is_dropped() {
        let rendered = render_path(Path::new("/srv/root"), Path::new("/elsewhere/a.txt"), PathStyle::Relative);
        assert_eq!(rendered, None);
    }

    #[test]
    fn joined_keeps_path_as_given() {
        let rendered = render_path(Path::new("rel"), Path::new("rel/b/a.txt"), PathStyle::Joined);
        assert_eq!(rendered, Some(PathBuf::from("rel/b/a.txt")));
    }

    #[test]
    fn summary_line_includes_rate() {
        let stats = ScanStats::compute(1100, std::time::Duration::from_secs(10));
        assert_eq!(
            summary_line(&stats),
            "Files browsed 1100, search duration : 10s (110 entries/s)"
        );
    }

    #[test]
    fn collecting_reporter_records_matches() {
        let r = CollectingReporter::new();
        r.report(Path::new("b"), EntryKind::Dir);
        r.report(Path::new("a.txt"), EntryKind::File);
        assert_eq!(r.sorted_paths(), vec![PathBuf::from("a.txt"), PathBuf::from("b")]);
        assert!(r.summary().is_none());
    }
}
