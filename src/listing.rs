//! Listing service: enumerates every project across all roots.
//!
//! Simpler sibling of the resolver. Applies the same directory and
//! dot-name filtering as the match engine, walks roots sequentially in
//! registry order, and propagates the first `RootUnavailable` it hits.
//! No partial output: a listing either covers every root or fails.

use crate::error::ResolveResult;
use crate::fs::DirectoryLister;
use crate::matching::visible_projects;
use crate::registry::RootRegistry;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One project in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifiedProject {
    pub root_name: String,
    pub project_name: String,
    pub path: PathBuf,
}

impl QualifiedProject {
    /// The `root<separator>project` identifier.
    pub fn qualified(&self, separator: &str) -> String {
        format!("{}{}{}", self.root_name, separator, self.project_name)
    }
}

/// Lists every project under every root, in registry order and
/// lexicographic order within a root.
pub fn list_projects<L: DirectoryLister + ?Sized>(
    lister: &L,
    registry: &RootRegistry,
) -> ResolveResult<Vec<QualifiedProject>> {
    let mut projects = Vec::new();
    for root in registry.roots() {
        let names = visible_projects(lister, root, registry.show_all_directories)?;
        projects.extend(names.into_iter().map(|name| QualifiedProject {
            path: root.path.join(&name),
            root_name: root.name.clone(),
            project_name: name,
        }));
    }
    Ok(projects)
}

/// Formats a listing as output lines: qualified names in listing order,
/// then, for completion word lists, the deduplicated bare project names.
pub fn format_listing(
    projects: &[QualifiedProject],
    separator: &str,
    completions: bool,
) -> Vec<String> {
    let mut lines: Vec<String> = projects
        .iter()
        .map(|project| project.qualified(separator))
        .collect();
    if completions {
        let bare: BTreeSet<&str> = projects
            .iter()
            .map(|project| project.project_name.as_str())
            .collect();
        lines.extend(bare.into_iter().map(String::from));
    }
    lines
}
