//! Directory enumeration seam.
//!
//! The match engine and listing service never touch `std::fs` directly;
//! they go through [`DirectoryLister`] so tests can substitute an
//! in-memory filesystem and the resolver stays a pure function of
//! (registry, filesystem, token).

use std::io;
use std::path::Path;

/// One immediate entry of a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_directory: bool,
}

/// Lists the immediate entries of a directory.
///
/// `Sync` so multi-root scans can fan out across threads; implementations
/// hold no mutable state.
pub trait DirectoryLister: Sync {
    /// Returns the immediate entries of `path`, in no particular order.
    /// Fails with the underlying I/O error when the path does not exist or
    /// cannot be read.
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

/// Production lister backed by `std::fs::read_dir`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsDirectoryLister;

impl DirectoryLister for OsDirectoryLister {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory lister for unit tests.

    use super::{DirEntryInfo, DirectoryLister};
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Maps directory paths to their immediate entries. Unknown paths fail
    /// with `NotFound`, mirroring a root that disappeared from disk.
    #[derive(Debug, Default)]
    pub struct MemoryLister {
        dirs: HashMap<PathBuf, Vec<DirEntryInfo>>,
    }

    impl MemoryLister {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a directory whose entries are all subdirectories.
        pub fn with_dirs(mut self, path: &str, names: &[&str]) -> Self {
            let entries = names
                .iter()
                .map(|name| DirEntryInfo {
                    name: (*name).to_string(),
                    is_directory: true,
                })
                .collect();
            self.dirs.insert(PathBuf::from(path), entries);
            self
        }

        /// Registers a non-directory entry inside an already known path.
        pub fn with_file(mut self, path: &str, name: &str) -> Self {
            self.dirs
                .entry(PathBuf::from(path))
                .or_default()
                .push(DirEntryInfo {
                    name: name.to_string(),
                    is_directory: false,
                });
            self
        }
    }

    impl DirectoryLister for MemoryLister {
        fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
            self.dirs.get(path).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "no such directory")
            })
        }
    }
}
