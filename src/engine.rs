use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder, WalkState};
use tracing::{debug, warn};

use crate::entry::{is_hidden, Entry, EntryKind};
use crate::error::FinderError;
use crate::matcher::NameMatcher;
use crate::options::{ErrorPolicy, Options, SearchRequest};
use crate::reporter::render_path;
use crate::results::{Results, ScanStats};
use crate::traits::{Matcher, Reporter};

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Search `request.root` for names matching `request.pattern`.
///
/// Matches go to `reporter` while the walk runs. Blocks until every worker
/// has finished; nothing is reported after this returns. When
/// `options.stats` is set and the search completes, the summary is passed
/// to [`Reporter::summarize`] before returning.
///
/// # Errors
///
/// Input errors, an inaccessible root and an invalid regex fail before any
/// directory is read. Under [`ErrorPolicy::Abort`] the first unreadable
/// directory stops all workers and is returned; lines already reported stay
/// reported and no summary is produced.
pub fn find(
    request:  &SearchRequest,
    options:  &Options,
    reporter: &dyn Reporter,
) -> Result<Results, FinderError> {
    request.validate()?;
    options.validate()?;

    let start = Instant::now();
    let walk_root = stat_root(&request.root)?;
    let matcher = NameMatcher::new(&request.pattern, options)?;

    execute(&request.root, &walk_root, options, &matcher, reporter, start)
}

/// Like [`find`], with a caller-supplied predicate in place of the
/// kind gate and name test. No pattern is involved, and `options.files`
/// and `options.dirs` are not consulted.
pub fn find_matching(
    root:     &Path,
    options:  &Options,
    matcher:  &dyn Matcher,
    reporter: &dyn Reporter,
) -> Result<Results, FinderError> {
    if root.as_os_str().is_empty() {
        return Err(FinderError::EmptyRoot);
    }
    options.validate_threads()?;

    let start = Instant::now();
    let walk_root = stat_root(root)?;

    execute(root, &walk_root, options, matcher, reporter, start)
}

fn execute(
    root:      &Path,
    walk_root: &Path,
    options:   &Options,
    matcher:   &dyn Matcher,
    reporter:  &dyn Reporter,
    start:     Instant,
) -> Result<Results, FinderError> {
    let results = walk(root, walk_root, options, matcher, reporter, start)?;

    if options.stats {
        reporter.summarize(&results);
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Root check
// ---------------------------------------------------------------------------

/// Stat the root without opening it, and return the path to hand the walker.
fn stat_root(root: &Path) -> Result<PathBuf, FinderError> {
    let meta = fs::symlink_metadata(root).map_err(|e| FinderError::from_io(root, e))?;

    if meta.file_type().is_symlink() {
        let target = fs::metadata(root).map_err(|e| FinderError::from_io(root, e))?;
        if !target.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }
        // The walker never follows links, but a trailing separator makes
        // the root itself resolve through its link.
        return Ok(root.join(""));
    }

    if !meta.is_dir() {
        return Err(FinderError::NotADirectory(root.to_path_buf()));
    }
    Ok(root.to_path_buf())
}

// ---------------------------------------------------------------------------
// walk()
// ---------------------------------------------------------------------------

/// The parallel walk. All concurrency lives here.
///
/// `root` is the path as the caller gave it, used for rendering;
/// `walk_root` is what the walker opens.
fn walk(
    root:      &Path,
    walk_root: &Path,
    opts:      &Options,
    matcher:   &dyn Matcher,
    reporter:  &dyn Reporter,
    start:     Instant,
) -> Result<Results, FinderError> {
    let mut builder = WalkBuilder::new(walk_root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .threads(opts.threads);

    let walker = builder.build_parallel();

    debug!(root = %root.display(), threads = opts.threads, "walk started");

    // Shared across workers
    let visited = AtomicUsize::new(0);
    let matches = AtomicUsize::new(0);
    let errors  = Mutex::new(Vec::<FinderError>::new());

    {
        let visited = &visited;
        let matches = &matches;
        let errors  = &errors;

        walker.run(move || {
            Box::new(move |res: Result<DirEntry, ignore::Error>| -> WalkState {
                let dent = match res {
                    Ok(d) => d,
                    Err(e) => {
                        return on_failure(map_walk_error(e, None), walk_root, opts.on_error, errors)
                    }
                };

                // The root is walked, not listed
                if dent.depth() == 0 {
                    return WalkState::Continue;
                }

                visited.fetch_add(1, Ordering::Relaxed);

                let entry = Entry {
                    name:  dent.file_name().to_string_lossy().into_owned(),
                    kind:  EntryKind::from_file_type(dent.file_type()),
                    path:  dent.into_path(),
                };

                if entry.is_dir() {
                    if opts.hidden.prunes_dirs() && is_hidden(&entry.path) {
                        return WalkState::Skip;
                    }
                } else if opts.hidden.skips_files() && is_hidden(&entry.path) {
                    return WalkState::Continue;
                }

                if matcher.is_match(&entry) {
                    if let Some(shown) = render_path(root, &entry.path, opts.paths) {
                        matches.fetch_add(1, Ordering::Relaxed);
                        reporter.report(&shown, entry.kind);
                    }
                }

                WalkState::Continue
            })
        });
    }

    let duration = start.elapsed();

    let visited = visited.load(Ordering::Relaxed);
    let matches = matches.load(Ordering::Relaxed);
    let mut errors = errors.into_inner().unwrap_or_default();

    debug!(visited, matches, errors = errors.len(), ?duration, "walk finished");

    if let Some(pos) = errors.iter().position(|e| is_fatal(e, walk_root, opts.on_error)) {
        return Err(errors.swap_remove(pos));
    }

    Ok(Results {
        matches,
        stats: ScanStats::compute(visited, duration),
        errors,
    })
}

/// Whether `err` ends the search under `policy`.
///
/// A failure on the root itself is always fatal: there is no other subtree
/// left to continue with.
fn is_fatal(err: &FinderError, walk_root: &Path, policy: ErrorPolicy) -> bool {
    policy == ErrorPolicy::Abort || !err.is_recoverable() || err.path() == Some(walk_root)
}

/// Route one walk failure through the error policy.
fn on_failure(
    err:       FinderError,
    walk_root: &Path,
    policy:    ErrorPolicy,
    errors:    &Mutex<Vec<FinderError>>,
) -> WalkState {
    let keep_going = !is_fatal(&err, walk_root, policy);

    if keep_going {
        warn!(error = %err, "skipping unreadable directory");
    }
    if let Ok(mut errs) = errors.lock() {
        errs.push(err);
    }

    if keep_going {
        WalkState::Continue
    } else {
        WalkState::Quit
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to FinderError
// ---------------------------------------------------------------------------

/// Unwrap the walker's depth/path wrappers, keeping the innermost path.
fn map_walk_error(e: ignore::Error, path: Option<PathBuf>) -> FinderError {
    match e {
        ignore::Error::WithDepth { err, .. }  => map_walk_error(*err, path),
        ignore::Error::WithPath { path, err } => map_walk_error(*err, Some(path)),
        ignore::Error::Io(io_err) => match path {
            Some(p) => FinderError::from_io(p, io_err),
            None    => FinderError::Walk(io_err.to_string()),
        },
        other => FinderError::Walk(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn walk_errors_keep_innermost_path() {
        let inner = ignore::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        let wrapped = ignore::Error::WithDepth {
            depth: 3,
            err: Box::new(ignore::Error::WithPath {
                path: PathBuf::from("/srv/root/locked"),
                err: Box::new(inner),
            }),
        };

        match map_walk_error(wrapped, None) {
            FinderError::PermissionDenied(p) => assert_eq!(p, PathBuf::from("/srv/root/locked")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn walk_error_without_path_is_generic() {
        let e = ignore::Error::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(map_walk_error(e, None), FinderError::Walk(_)));
    }

    #[test]
    fn abort_policy_quits_and_records() {
        let errors = Mutex::new(Vec::new());
        let state = on_failure(
            FinderError::PermissionDenied("/srv/root/x".into()),
            Path::new("/srv/root"),
            ErrorPolicy::Abort,
            &errors,
        );
        assert!(matches!(state, WalkState::Quit));
        assert_eq!(errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn continue_policy_keeps_walking() {
        let errors = Mutex::new(Vec::new());
        let state = on_failure(
            FinderError::PermissionDenied("/srv/root/x".into()),
            Path::new("/srv/root"),
            ErrorPolicy::Continue,
            &errors,
        );
        assert!(matches!(state, WalkState::Continue));
        assert_eq!(errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn root_failure_quits_even_when_continuing() {
        let errors = Mutex::new(Vec::new());
        let state = on_failure(
            FinderError::PermissionDenied("/srv/root".into()),
            Path::new("/srv/root"),
            ErrorPolicy::Continue,
            &errors,
        );
        assert!(matches!(state, WalkState::Quit));
        assert_eq!(errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn stat_root_rejects_missing_and_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(stat_root(&missing), Err(FinderError::NotFound(_))));

        let file = dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(stat_root(&file), Err(FinderError::NotADirectory(_))));

        assert_eq!(stat_root(dir.path()).unwrap(), dir.path());
    }
}
