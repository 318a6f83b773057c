//! Configuration for the project-directory resolver.
//!
//! Layered configuration:
//! - Default values
//! - TOML settings file (`<config dir>/projhop/settings.toml`)
//! - Environment variable overrides
//!
//! Environment variables are prefixed with `PROJHOP_`, e.g.
//! `PROJHOP_NAMESPACE_SEPARATOR=@` or `PROJHOP_SHOW_ALL_DIRECTORIES=true`.
//!
//! The file doubles as the persistence target for root-management
//! commands: mutations edit the in-memory [`Settings`] and write the full
//! snapshot back as pretty TOML.

use crate::error::{ConfigError, ConfigResult};
use crate::registry::{Root, RootRegistry, normalize_root_path};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted settings plus display configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Named project roots, in insertion order.
    #[serde(default)]
    pub roots: Vec<Root>,

    /// Separator between root names and project names in qualified
    /// identifiers.
    #[serde(default = "default_separator")]
    pub namespace_separator: String,

    /// Include project directory names starting with '.'.
    #[serde(default)]
    pub show_all_directories: bool,

    /// Legacy single-root shape from early versions. Accepted on read and
    /// converted into a root named "legacy" by [`Settings::migrate_legacy`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<String>,
}

fn default_separator() -> String {
    ":".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            namespace_separator: default_separator(),
            show_all_directories: false,
            project_root: None,
        }
    }
}

impl Settings {
    /// The default settings file location for this platform.
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("projhop").join("settings.toml"))
    }

    /// Load configuration from all sources, with the settings file at its
    /// default location.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from all sources, with the settings file at an
    /// explicit location.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in the settings file if it exists
            .merge(Toml::file(config_path))
            // Layer in environment variables with PROJHOP_ prefix
            .merge(Env::prefixed("PROJHOP_"))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Write the full snapshot back as pretty TOML, creating parent
    /// directories as needed.
    pub fn save(&self, config_path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(config_path, contents).map_err(|source| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %config_path.display(), "settings written");
        Ok(())
    }

    /// One-time migration of the legacy single-root shape.
    ///
    /// A `project_root` string becomes a root named "legacy" (trailing
    /// slash stripped), appended only when that name is still free. Returns
    /// whether anything changed, so callers know to persist. Idempotent:
    /// `project_root` is cleared either way.
    pub fn migrate_legacy(&mut self) -> bool {
        let Some(path) = self.project_root.take() else {
            return false;
        };
        if !self.roots.iter().any(|root| root.name == "legacy") {
            self.roots.push(Root::new("legacy", normalize_root_path(Path::new(&path))));
        }
        tracing::debug!("migrated legacy project_root into the roots list");
        true
    }

    /// An immutable registry snapshot for a single resolution or listing.
    pub fn registry(&self) -> RootRegistry {
        RootRegistry::new(
            self.roots.clone(),
            self.namespace_separator.clone(),
            self.show_all_directories,
        )
    }

    /// Applies a `projhop config <key> <value>` edit. Returns the stored
    /// value for display.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> ConfigResult<String> {
        match key {
            "namespace-separator" => {
                self.namespace_separator = value.to_string();
                Ok(self.namespace_separator.clone())
            }
            "show-all-directories" => {
                let flag = matches!(value.to_lowercase().as_str(), "yes" | "true");
                self.show_all_directories = flag;
                Ok(flag.to_string())
            }
            _ => Err(ConfigError::UnknownSetting {
                key: key.to_string(),
            }),
        }
    }
}
