//! Error types for the project-directory resolver
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by root-registry mutations.
///
/// Every variant leaves the registry unchanged; a failed mutation never
/// results in a partially applied edit.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("There is already a project root with the name '{name}'. Please choose another name.")]
    NameConflict { name: String },

    #[error("You already added the path '{path}' as a project root.")]
    PathConflict { path: PathBuf },

    #[error("There is no project root with the name '{name}'. Please choose an existing name.")]
    RootNotFound { name: String },

    #[error("The directory '{path}' does not exist.")]
    PathMissing { path: PathBuf },

    #[error("The path '{path}' is not a directory.")]
    NotADirectory { path: PathBuf },

    #[error("Root names may not be empty.")]
    EmptyName,

    #[error(
        "The root name '{name}' contains the namespace separator '{separator}'. \
         Qualified project names could not be split unambiguously."
    )]
    SeparatorInName { name: String, separator: String },
}

/// Errors raised while resolving a search token or listing projects.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A configured root path no longer exists or cannot be read.
    ///
    /// Distinct from "root not configured": the registry knows this root,
    /// the filesystem does not. Treated as a configuration error requiring
    /// user attention, never skipped silently.
    #[error("The project root '{root}' is not available anymore ({source}). Please investigate!")]
    RootUnavailable {
        root: String,
        source: std::io::Error,
    },
}

/// Errors raised by configuration load, save, and mutation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write configuration to '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,

    #[error("I don't know any setting called '{key}'.")]
    UnknownSetting { key: String },
}

/// Errors raised while installing shell helpers.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("This command currently only supports the 'fish' and 'bash' shells, not '{shell}'.")]
    UnsupportedShell { shell: String },

    #[error(
        "Unable to find the {what} path via pkg-config. Please make sure pkg-config is \
         installed or pass the path explicitly."
    )]
    PkgConfig { what: &'static str },

    #[error("Could not determine the current user's home directory")]
    NoHomeDir,

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for registry mutations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for resolution and listing
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for shell-helper installation
pub type InstallResult<T> = Result<T, InstallError>;
