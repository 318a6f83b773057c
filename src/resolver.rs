//! Resolver: maps a search token to a project path, or to a candidate set
//! when disambiguation is needed.
//!
//! The resolver performs no interactive I/O. An [`Resolution::Ambiguous`]
//! outcome carries the ordered candidate list; the caller hands it to a
//! prompt collaborator and feeds the choice back into its own flow.

use crate::error::ResolveResult;
use crate::fs::DirectoryLister;
use crate::matching::{ProjectMatch, find_in_root};
use crate::registry::{Root, RootRegistry};
use rayon::prelude::*;

/// A parsed search token.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenQuery<'a> {
    /// `<root><separator><project>` where the left part names a known root.
    RootQualified { root: &'a Root, project: &'a str },
    /// Everything else: the whole token is a project name searched across
    /// all roots.
    Bare(&'a str),
}

/// Splits `token` on the first occurrence of the namespace separator.
///
/// The token is root-qualified only when the left part is non-empty and
/// names a known root. A left part that names no root falls back to a bare
/// search of the entire token; it is never an "unknown root" error.
pub fn parse_token<'a>(registry: &'a RootRegistry, token: &'a str) -> TokenQuery<'a> {
    if let Some((left, right)) = token.split_once(registry.separator.as_str()) {
        if !left.is_empty() {
            if let Some(root) = registry.find(left) {
                return TokenQuery::RootQualified {
                    root,
                    project: right,
                };
            }
        }
    }
    TokenQuery::Bare(token)
}

/// Outcome of a resolution. `Ambiguous` is not a failure until the user
/// cancels the subsequent disambiguation.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ProjectMatch),
    Ambiguous(Vec<ProjectMatch>),
    NotFound,
}

/// Resolves `token` against the registry snapshot.
///
/// Root-qualified tokens search only the named root. Bare tokens fan out
/// across every root (in parallel; results are merged back in registry
/// order) and, when any exact match exists, the candidate set narrows to
/// exact matches only. Two roots holding a project with the same name is a
/// legitimate ambiguity, never silently decided.
///
/// A missing root fails the whole resolution with `RootUnavailable`; a
/// vanished root directory is a configuration error requiring attention,
/// not something to skip.
pub fn resolve<L: DirectoryLister + ?Sized>(
    lister: &L,
    registry: &RootRegistry,
    token: &str,
) -> ResolveResult<Resolution> {
    let show_all = registry.show_all_directories;

    let matches = match parse_token(registry, token) {
        TokenQuery::RootQualified { root, project } => {
            tracing::debug!(root = %root.name, project, "root-qualified search");
            find_in_root(lister, root, project, show_all)?
        }
        TokenQuery::Bare(project) => {
            tracing::debug!(project, roots = registry.roots().len(), "bare search");
            let per_root: Vec<Vec<ProjectMatch>> = registry
                .roots()
                .par_iter()
                .map(|root| find_in_root(lister, root, project, show_all))
                .collect::<ResolveResult<_>>()?;
            let all: Vec<ProjectMatch> = per_root.into_iter().flatten().collect();

            // Exact-first narrowing. Within one root an exact hit already
            // suppressed partials, so this only bites across roots.
            if all.iter().any(|m| m.exact) {
                all.into_iter().filter(|m| m.exact).collect()
            } else {
                all
            }
        }
    };

    Ok(match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Resolved(matches.into_iter().next().unwrap()),
        _ => Resolution::Ambiguous(matches),
    })
}
