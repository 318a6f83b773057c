//! Match engine: candidate search within a single root.
//!
//! The one piece of intentional policy here: an exact hit suppresses
//! partial hits from the same root, while multiple exact hits across
//! different roots remain a legitimate ambiguity for the resolver to
//! surface. Matching is therefore an explicit two-phase filter (exact
//! first, then substring), never a combined sort.

use crate::error::{ResolveError, ResolveResult};
use crate::fs::DirectoryLister;
use crate::registry::Root;
use std::path::PathBuf;

/// A candidate project produced by the match engine. Transient, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch {
    pub root_name: String,
    pub project_name: String,
    pub path: PathBuf,
    pub exact: bool,
}

impl ProjectMatch {
    /// The unambiguous `root<separator>project` identifier.
    pub fn qualified(&self, separator: &str) -> String {
        format!("{}{}{}", self.root_name, separator, self.project_name)
    }
}

/// Returns the project names visible under a root: immediate directories
/// only, dot-names dropped unless `show_all`, sorted lexicographically so
/// output order never depends on filesystem enumeration order.
pub(crate) fn visible_projects<L: DirectoryLister + ?Sized>(
    lister: &L,
    root: &Root,
    show_all: bool,
) -> ResolveResult<Vec<String>> {
    let entries = lister
        .list(&root.path)
        .map_err(|source| ResolveError::RootUnavailable {
            root: root.name.clone(),
            source,
        })?;

    let mut names: Vec<String> = entries
        .into_iter()
        .filter(|entry| entry.is_directory)
        .map(|entry| entry.name)
        .filter(|name| show_all || !name.starts_with('.'))
        .collect();
    names.sort_unstable();
    Ok(names)
}

/// Finds candidate projects for `token` under a single root.
///
/// An exact directory-name hit short-circuits the partial scan and returns
/// a single match with `exact = true`. Otherwise every name containing
/// `token` as a case-sensitive substring is returned, in lexicographic
/// order.
pub fn find_in_root<L: DirectoryLister + ?Sized>(
    lister: &L,
    root: &Root,
    token: &str,
    show_all: bool,
) -> ResolveResult<Vec<ProjectMatch>> {
    let names = visible_projects(lister, root, show_all)?;

    if names.iter().any(|name| name == token) {
        return Ok(vec![ProjectMatch {
            root_name: root.name.clone(),
            project_name: token.to_string(),
            path: root.path.join(token),
            exact: true,
        }]);
    }

    Ok(names
        .into_iter()
        .filter(|name| name.contains(token))
        .map(|name| ProjectMatch {
            path: root.path.join(&name),
            root_name: root.name.clone(),
            project_name: name,
            exact: false,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memory::MemoryLister;

    fn root() -> Root {
        Root::new("main", "/srv/main")
    }

    fn lister() -> MemoryLister {
        MemoryLister::new().with_dirs("/srv/main", &["foo", "foobar", ".hidden"])
    }

    #[test]
    fn exact_match_suppresses_partials() {
        let matches = find_in_root(&lister(), &root(), "foo", false).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].exact);
        assert_eq!(matches[0].project_name, "foo");
        assert_eq!(matches[0].path, PathBuf::from("/srv/main/foo"));
    }

    #[test]
    fn substring_matches_are_partial() {
        let matches = find_in_root(&lister(), &root(), "oob", false).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(!matches[0].exact);
        assert_eq!(matches[0].project_name, "foobar");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let matches = find_in_root(&lister(), &root(), "FOO", false).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn hidden_directories_are_excluded_by_default() {
        let matches = find_in_root(&lister(), &root(), "hidden", false).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn show_all_includes_hidden_directories() {
        let matches = find_in_root(&lister(), &root(), "hidden", true).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].project_name, ".hidden");
    }

    #[test]
    fn files_never_match() {
        let lister = MemoryLister::new()
            .with_dirs("/srv/main", &["foo"])
            .with_file("/srv/main", "foo.txt");
        let matches = find_in_root(&lister, &root(), "foo", false).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].exact);
    }

    #[test]
    fn partial_results_are_sorted() {
        let lister = MemoryLister::new().with_dirs("/srv/main", &["zoo-api", "api", "api-gateway"]);
        let matches = find_in_root(&lister, &root(), "ap", false).unwrap();
        let names: Vec<_> = matches.iter().map(|m| m.project_name.as_str()).collect();
        assert_eq!(names, ["api", "api-gateway", "zoo-api"]);
    }

    #[test]
    fn missing_root_is_root_unavailable() {
        let gone = Root::new("gone", "/srv/gone");
        let err = find_in_root(&lister(), &gone, "foo", false).unwrap_err();
        let crate::error::ResolveError::RootUnavailable { root, .. } = err;
        assert_eq!(root, "gone");
    }
}
