//! projhop: project-directory resolver behind the `gp` jump-to-project
//! shell workflow.
//!
//! Given a set of named filesystem roots (directories each containing one
//! level of project subdirectories), projhop resolves a `root:project` or
//! bare `project` token into a project path, asking the user to pick when
//! the token is ambiguous.

pub mod config;
pub mod error;
pub mod fs;
pub mod install;
pub mod io;
pub mod listing;
pub mod matching;
pub mod registry;
pub mod resolver;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{
    ConfigError, ConfigResult, InstallError, InstallResult, RegistryError, RegistryResult,
    ResolveError, ResolveResult,
};
pub use fs::{DirEntryInfo, DirectoryLister, OsDirectoryLister};
pub use listing::{QualifiedProject, format_listing, list_projects};
pub use matching::{ProjectMatch, find_in_root};
pub use registry::{Root, RootRegistry, normalize_root_path};
pub use resolver::{Resolution, TokenQuery, parse_token, resolve};
