use std::path::{Path, PathBuf};

/// A single item produced by listing a directory during traversal.
///
/// Built once per listing item by the engine and never mutated afterwards.
/// Hidden-ness is not stored; see [`is_hidden`].
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path joined from the listed directory and the entry name.
    pub path: PathBuf,

    /// The entry's base name. Pattern tests run against this, never the full path.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// The kind of a traversed entry.
///
/// Symlinks are never followed, so a link to a directory is a `Symlink`,
/// and it is matched and reported like a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(ft: Option<std::fs::FileType>) -> Self {
        match ft {
            Some(ft) if ft.is_dir()     => Self::Dir,
            Some(ft) if ft.is_file()    => Self::File,
            Some(ft) if ft.is_symlink() => Self::Symlink,
            _                           => Self::Other,
        }
    }
}

/// Whether the entry at `path` carries the platform's hidden marker.
///
/// Windows reads `FILE_ATTRIBUTE_HIDDEN`; unreadable attributes count as
/// not hidden. Elsewhere a leading dot in the base name marks it hidden.
#[cfg(windows)]
pub fn is_hidden(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    std::fs::symlink_metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

/// Whether the entry at `path` carries the platform's hidden marker.
///
/// Windows reads `FILE_ATTRIBUTE_HIDDEN`; unreadable attributes count as
/// not hidden. Elsewhere a leading dot in the base name marks it hidden.
#[cfg(not(windows))]
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
