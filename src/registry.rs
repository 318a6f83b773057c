//! Root registry: the ordered set of named project roots.
//!
//! A root is a named directory whose immediate subdirectories are projects.
//! The registry enforces the two uniqueness invariants (no duplicate names,
//! no duplicate paths) and hosts the structural edits behind the
//! `root add`, `root rename` and `root delete` commands. A registry
//! snapshot is immutable for the duration of a resolution.

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A named project root.
///
/// `name` is unique across the registry (case-sensitive) and may not
/// contain the configured namespace separator. `path` is stored with
/// trailing path separators stripped; its existence is validated when the
/// root is added, not on every resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub name: String,
    pub path: PathBuf,
}

impl Root {
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            path: normalize_root_path(path.as_ref()),
        }
    }
}

/// Strips trailing path separators so that `/x/y/` and `/x/y` compare and
/// store identically. A bare filesystem root (`/`) is left alone.
///
/// Works at the component level, so non-UTF-8 path bytes survive
/// normalization intact.
pub fn normalize_root_path(path: &Path) -> PathBuf {
    path.components().as_path().to_path_buf()
}

/// Ordered sequence of roots plus display configuration.
///
/// Insertion order is preserved for iteration and display but carries no
/// meaning for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRegistry {
    roots: Vec<Root>,
    /// Joins a root name and a project name in qualified identifiers.
    pub separator: String,
    /// When false, subdirectories starting with `.` are excluded from both
    /// listing and matching.
    pub show_all_directories: bool,
}

impl RootRegistry {
    pub fn new(roots: Vec<Root>, separator: impl Into<String>, show_all_directories: bool) -> Self {
        Self {
            roots,
            separator: separator.into(),
            show_all_directories,
        }
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Root> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Root> {
        self.roots.iter().find(|root| root.name == name)
    }

    /// Fails when another root already has this name, when the name is
    /// empty, or when it contains the namespace separator.
    pub fn validate_name(&self, name: &str) -> RegistryResult<()> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if name.contains(&self.separator) {
            return Err(RegistryError::SeparatorInName {
                name: name.to_string(),
                separator: self.separator.clone(),
            });
        }
        if self.roots.iter().any(|root| root.name == name) {
            return Err(RegistryError::NameConflict {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Fails when another root already has this exact path, after
    /// trailing-slash normalization.
    pub fn validate_path(&self, path: &Path) -> RegistryResult<()> {
        let normalized = normalize_root_path(path);
        if self.roots.iter().any(|root| root.path == normalized) {
            return Err(RegistryError::PathConflict { path: normalized });
        }
        Ok(())
    }

    /// Adds a root after validating both uniqueness invariants and the
    /// filesystem target (must exist and be a directory).
    ///
    /// A failed add never mutates the registry.
    pub fn add(&mut self, name: &str, path: &Path) -> RegistryResult<&Root> {
        self.validate_name(name)?;
        self.validate_path(path)?;

        let normalized = normalize_root_path(path);
        match std::fs::metadata(&normalized) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(RegistryError::NotADirectory { path: normalized }),
            Err(_) => return Err(RegistryError::PathMissing { path: normalized }),
        }

        self.roots.push(Root::new(name, &normalized));
        Ok(self.roots.last().unwrap())
    }

    /// Renames a root. Requires the new name to be free of conflicts; does
    /// not validate the filesystem.
    pub fn rename(&mut self, current: &str, new: &str) -> RegistryResult<()> {
        if !self.roots.iter().any(|root| root.name == current) {
            return Err(RegistryError::RootNotFound {
                name: current.to_string(),
            });
        }
        self.validate_name(new)?;

        // Unwrap is fine: presence was checked above.
        let root = self
            .roots
            .iter_mut()
            .find(|root| root.name == current)
            .unwrap();
        root.name = new.to_string();
        Ok(())
    }

    /// Deletes a root by name. Reports "not found" and makes no change when
    /// no root carries that name.
    ///
    /// The presence check must be an explicit `Option` test: position 0 is
    /// a perfectly valid match and must not be mistaken for "no match".
    pub fn delete(&mut self, name: &str) -> RegistryResult<Root> {
        match self.roots.iter().position(|root| root.name == name) {
            Some(index) => Ok(self.roots.remove(index)),
            None => Err(RegistryError::RootNotFound {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> RootRegistry {
        let roots = names
            .iter()
            .map(|name| Root::new(*name, format!("/srv/{name}")))
            .collect();
        RootRegistry::new(roots, ":", false)
    }

    #[test]
    fn normalizes_trailing_separators() {
        assert_eq!(
            normalize_root_path(Path::new("/home/me/projects/")),
            PathBuf::from("/home/me/projects")
        );
        assert_eq!(
            normalize_root_path(Path::new("/home/me/projects")),
            PathBuf::from("/home/me/projects")
        );
    }

    #[test]
    fn normalization_leaves_the_filesystem_root_alone() {
        assert_eq!(normalize_root_path(Path::new("/")), PathBuf::from("/"));
    }

    #[cfg(unix)]
    #[test]
    fn normalization_keeps_non_utf8_paths_intact() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = Path::new(OsStr::from_bytes(b"/srv/pr\xf0jects/"));
        let expected = PathBuf::from(OsStr::from_bytes(b"/srv/pr\xf0jects").to_os_string());
        assert_eq!(normalize_root_path(raw), expected);
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let reg = registry(&["main", "work"]);
        assert!(matches!(
            reg.validate_name("main"),
            Err(RegistryError::NameConflict { .. })
        ));
        assert!(reg.validate_name("oss").is_ok());
    }

    #[test]
    fn duplicate_path_is_a_conflict_after_normalization() {
        let reg = registry(&["main"]);
        assert!(matches!(
            reg.validate_path(Path::new("/srv/main/")),
            Err(RegistryError::PathConflict { .. })
        ));
    }

    #[test]
    fn name_with_separator_is_rejected() {
        let reg = registry(&[]);
        assert!(matches!(
            reg.validate_name("my:root"),
            Err(RegistryError::SeparatorInName { .. })
        ));
    }

    #[test]
    fn add_requires_existing_directory() {
        let mut reg = registry(&[]);
        let err = reg.add("ghost", Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, RegistryError::PathMissing { .. }));
        assert!(reg.roots().is_empty(), "failed add must not mutate");
    }

    #[test]
    fn add_with_duplicate_name_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = registry(&["main"]);
        let before = reg.clone();
        assert!(matches!(
            reg.add("main", dir.path()),
            Err(RegistryError::NameConflict { .. })
        ));
        assert_eq!(reg, before);
    }

    #[test]
    fn add_rejects_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let mut reg = registry(&[]);
        assert!(matches!(
            reg.add("file", &file),
            Err(RegistryError::NotADirectory { .. })
        ));
    }

    #[test]
    fn add_stores_normalized_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = registry(&[]);
        let with_slash = format!("{}/", dir.path().display());
        reg.add("tmp", Path::new(&with_slash)).unwrap();
        assert_eq!(reg.find("tmp").unwrap().path, normalize_root_path(dir.path()));
    }

    #[test]
    fn rename_checks_both_ends() {
        let mut reg = registry(&["main", "work"]);
        assert!(matches!(
            reg.rename("nope", "other"),
            Err(RegistryError::RootNotFound { .. })
        ));
        assert!(matches!(
            reg.rename("main", "work"),
            Err(RegistryError::NameConflict { .. })
        ));
        reg.rename("main", "oss").unwrap();
        assert!(reg.find("oss").is_some());
        assert!(reg.find("main").is_none());
    }

    #[test]
    fn delete_missing_root_leaves_registry_untouched() {
        let mut reg = registry(&["main", "work"]);
        let before = reg.clone();
        assert!(matches!(
            reg.delete("nope"),
            Err(RegistryError::RootNotFound { .. })
        ));
        assert_eq!(reg, before);
    }

    #[test]
    fn delete_works_at_position_zero() {
        // Regression check for the off-by-falsy-index class of bug: the
        // first root is index 0 and must still be deletable.
        let mut reg = registry(&["main", "work"]);
        let removed = reg.delete("main").unwrap();
        assert_eq!(removed.name, "main");
        assert_eq!(reg.roots().len(), 1);
        assert_eq!(reg.roots()[0].name, "work");
    }
}
