use std::time::Duration;

use crate::error::FinderError;

/// The output of a completed search.
///
/// Matched paths are not collected here; they go to the
/// [`Reporter`](crate::Reporter) as the walk finds them.
#[derive(Debug)]
pub struct Results {
    /// Total number of entries reported.
    pub matches: usize,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Subtrees skipped under [`ErrorPolicy::Continue`](crate::ErrorPolicy::Continue).
    /// Always empty under the default `Abort` policy, which fails the search instead.
    pub errors: Vec<FinderError>,
}

impl Results {
    /// Whether any subtree was skipped.
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Performance statistics for a completed scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanStats {
    /// Every child of every listed directory, counted once. Hidden
    /// directories count, their contents don't.
    pub visited: usize,

    /// Wall-clock time from the root check to completion.
    pub duration: Duration,

    /// `visited / duration.as_secs_f64()`, clamped to 0 on zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(visited: usize, duration: Duration) -> Self {
        let eps = if duration.as_secs_f64() > 0.0 {
            (visited as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            visited,
            duration,
            entries_per_sec: eps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_zero_for_zero_duration() {
        let s = ScanStats::compute(500, Duration::ZERO);
        assert_eq!(s.entries_per_sec, 0);
    }

    #[test]
    fn rate_from_count_and_duration() {
        let s = ScanStats::compute(1100, Duration::from_secs(10));
        assert_eq!(s.entries_per_sec, 110);
    }
}
