use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    // Input
    #[error("Needs location to search")]
    EmptyRoot,

    #[error("Needs value to search")]
    EmptyPattern,

    #[error("Needs to search files [-f], folders [-d] or both")]
    NoKindSelected,

    #[error("invalid thread count: {0}")]
    InvalidThreadCount(usize),

    // Traversal
    #[error("Invalid path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot access to {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot access to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    // Pattern
    #[error("Invalid regex : {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl FinderError {
    /// Classify an I/O failure at `path` into the matching variant.
    pub(crate) fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound         => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _                               => Self::Io { path, source: err },
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::NotADirectory(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the walk could skip the failing subtree and keep going.
    ///
    /// Only consulted under [`ErrorPolicy::Continue`](crate::ErrorPolicy::Continue);
    /// input and pattern errors are always fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::PermissionDenied(_)
                | Self::NotADirectory(_)
                | Self::Io { .. }
                | Self::Walk(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified_by_kind() {
        let denied = FinderError::from_io("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, FinderError::PermissionDenied(_)));

        let missing = FinderError::from_io("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, FinderError::NotFound(_)));

        let other = FinderError::from_io("/x", io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(other, FinderError::Io { .. }));
        assert_eq!(other.path(), Some(Path::new("/x")));
    }

    #[test]
    fn input_errors_are_not_recoverable() {
        assert!(!FinderError::EmptyPattern.is_recoverable());
        assert!(!FinderError::NoKindSelected.is_recoverable());
        assert!(FinderError::PermissionDenied("/x".into()).is_recoverable());
    }
}
