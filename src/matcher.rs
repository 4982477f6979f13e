use regex::{Regex, RegexBuilder};

use crate::entry::Entry;
use crate::error::FinderError;
use crate::options::{MatchMode, Options};
use crate::traits::Matcher;

/// The name test applied to entries that pass the kind gate.
#[derive(Debug)]
enum NameTest {
    /// Literal containment. `folded` means both sides are lowercased.
    Substring { pattern: String, folded: bool },

    /// Unanchored regex search.
    Regex(Regex),
}

/// The default predicate: entry-kind gate followed by a name test.
///
/// Constructed once per search. Building it in regex mode compiles the
/// pattern, so an invalid pattern is rejected before any directory is read.
#[derive(Debug)]
pub struct NameMatcher {
    files: bool,
    dirs:  bool,
    test:  NameTest,
}

impl NameMatcher {
    pub fn new(pattern: &str, opts: &Options) -> Result<Self, FinderError> {
        let test = match opts.mode {
            MatchMode::Regex => {
                let re = RegexBuilder::new(pattern)
                    .case_insensitive(opts.case_insensitive)
                    .build()
                    .map_err(|source| FinderError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })?;
                NameTest::Regex(re)
            }
            MatchMode::Substring => NameTest::Substring {
                pattern: if opts.case_insensitive {
                    pattern.to_lowercase()
                } else {
                    pattern.to_string()
                },
                folded: opts.case_insensitive,
            },
        };

        Ok(Self {
            files: opts.files,
            dirs:  opts.dirs,
            test,
        })
    }

    fn kind_requested(&self, entry: &Entry) -> bool {
        if entry.is_dir() {
            self.dirs
        } else {
            self.files
        }
    }

    fn name_matches(&self, name: &str) -> bool {
        match &self.test {
            NameTest::Substring { pattern, folded: false } => name.contains(pattern.as_str()),
            NameTest::Substring { pattern, folded: true } => {
                name.to_lowercase().contains(pattern.as_str())
            }
            NameTest::Regex(re) => re.is_match(name),
        }
    }
}

impl Matcher for NameMatcher {
    fn is_match(&self, entry: &Entry) -> bool {
        self.kind_requested(entry) && self.name_matches(&entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;

    fn entry(name: &str, kind: EntryKind) -> Entry {
        Entry {
            path: name.into(),
            name: name.to_string(),
            kind,
        }
    }

    fn opts(files: bool, dirs: bool, mode: MatchMode) -> Options {
        Options { files, dirs, mode, ..Options::default() }
    }

    #[test]
    fn kind_gate() {
        let file = entry("a.txt", EntryKind::File);
        let dir = entry("a_dir", EntryKind::Dir);
        let link = entry("a_link", EntryKind::Symlink);

        let files_only = NameMatcher::new("a", &opts(true, false, MatchMode::Substring)).unwrap();
        assert!(files_only.is_match(&file));
        assert!(files_only.is_match(&link));
        assert!(!files_only.is_match(&dir));

        let dirs_only = NameMatcher::new("a", &opts(false, true, MatchMode::Substring)).unwrap();
        assert!(!dirs_only.is_match(&file));
        assert!(dirs_only.is_match(&dir));

        let both = NameMatcher::new("a", &opts(true, true, MatchMode::Substring)).unwrap();
        assert!(both.is_match(&file));
        assert!(both.is_match(&dir));
    }

    #[test]
    fn substring_is_case_sensitive_by_default() {
        let m = NameMatcher::new("Report", &opts(true, false, MatchMode::Substring)).unwrap();
        assert!(m.is_match(&entry("Q1_Report.pdf", EntryKind::File)));
        assert!(!m.is_match(&entry("q1_report.pdf", EntryKind::File)));
    }

    #[test]
    fn substring_case_insensitive() {
        let o = Options { case_insensitive: true, ..opts(true, false, MatchMode::Substring) };
        let m = NameMatcher::new("REPORT", &o).unwrap();
        assert!(m.is_match(&entry("q1_report.pdf", EntryKind::File)));
    }

    #[test]
    fn regex_is_unanchored() {
        let m = NameMatcher::new(r"\d{3}", &opts(true, false, MatchMode::Regex)).unwrap();
        assert!(m.is_match(&entry("img_004.png", EntryKind::File)));
        assert!(!m.is_match(&entry("img_04.png", EntryKind::File)));
    }

    #[test]
    fn regex_anchor_applies_to_base_name() {
        let m = NameMatcher::new(r"^a\.", &opts(true, true, MatchMode::Regex)).unwrap();
        let mut nested = entry("a.txt", EntryKind::File);
        nested.path = "b/a.txt".into();
        assert!(m.is_match(&nested));
        assert!(!m.is_match(&entry("ba.txt", EntryKind::File)));
    }

    #[test]
    fn regex_case_insensitive() {
        let o = Options { case_insensitive: true, ..opts(true, false, MatchMode::Regex) };
        let m = NameMatcher::new("^readme", &o).unwrap();
        assert!(m.is_match(&entry("README.md", EntryKind::File)));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = NameMatcher::new("(unclosed", &opts(true, false, MatchMode::Regex)).unwrap_err();
        assert!(matches!(err, FinderError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn regex_metacharacters_are_literal_in_substring_mode() {
        let m = NameMatcher::new("(unclosed", &opts(true, false, MatchMode::Substring)).unwrap();
        assert!(m.is_match(&entry("x(unclosed).txt", EntryKind::File)));
    }
}
