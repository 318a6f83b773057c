//! Shell helper installation.
//!
//! Writes the `gp` shell function and its completions for bash and fish.
//! Script text is embedded in the binary at compile time. Target
//! directories derive from an injected [`ShellEnv`] (home directory plus
//! environment variables) so the selection logic stays testable; system
//! scope asks `pkg-config` for the distribution's directories.

use crate::error::{InstallError, InstallResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

const BASH_COMPLETIONS: &str = include_str!("../shell/bash/gp-completions.bash");
const BASH_COMMANDS: &str = include_str!("../shell/bash/gp.bash");
const FISH_COMPLETIONS: &str = include_str!("../shell/fish/gp-completions.fish");
const FISH_COMMANDS: &str = include_str!("../shell/fish/gp.fish");

/// Shells with install support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Fish,
}

impl Shell {
    pub fn from_name(name: &str) -> InstallResult<Self> {
        match name {
            "bash" => Ok(Self::Bash),
            "fish" => Ok(Self::Fish),
            other => Err(InstallError::UnsupportedShell {
                shell: other.to_string(),
            }),
        }
    }

    fn completions_script(self) -> &'static str {
        match self {
            Self::Bash => BASH_COMPLETIONS,
            Self::Fish => FISH_COMPLETIONS,
        }
    }

    fn commands_script(self) -> &'static str {
        match self {
            Self::Bash => BASH_COMMANDS,
            Self::Fish => FISH_COMMANDS,
        }
    }

    fn file_name(self, kind: &str) -> String {
        match self {
            Self::Bash => format!("{kind}.bash"),
            Self::Fish => format!("{kind}.fish"),
        }
    }
}

/// Home directory and environment variables as an injected capability, so
/// directory selection does not read process globals directly.
#[derive(Debug, Clone)]
pub struct ShellEnv {
    pub home: PathBuf,
    vars: HashMap<String, String>,
}

impl ShellEnv {
    pub fn from_os() -> InstallResult<Self> {
        let home = dirs::home_dir().ok_or(InstallError::NoHomeDir)?;
        Ok(Self {
            home,
            vars: std::env::vars().collect(),
        })
    }

    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            vars: HashMap::new(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// The fish configuration directory (`$XDG_CONFIG_HOME/fish` or
    /// `~/.config/fish`).
    fn fish_config_dir(&self) -> PathBuf {
        self.var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| self.home.join(".config"))
            .join("fish")
    }
}

/// Installation scope and explicit directory overrides.
#[derive(Debug, Default, Clone)]
pub struct InstallOptions {
    /// Install for all users; resolves directories via pkg-config.
    pub global: bool,
    pub completions_path: Option<PathBuf>,
    pub commands_path: Option<PathBuf>,
}

/// Where the helper files ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub completions_file: PathBuf,
    pub commands_file: PathBuf,
}

/// Installs the completion and command scripts for `shell`.
pub fn install(shell: Shell, options: &InstallOptions, env: &ShellEnv) -> InstallResult<InstallSummary> {
    let completions_dir = completions_dir(shell, options, env)?;
    let commands_dir = commands_dir(shell, options, env)?;

    let completions_file = completions_dir.join(shell.file_name("gp-completions"));
    write_script(&completions_file, shell.completions_script())?;

    let commands_file = commands_dir.join(shell.file_name("gp"));
    write_script(&commands_file, shell.commands_script())?;

    // Bash has no directory of auto-sourced functions. When installing
    // into the home directory, wire the function up via .bashrc.
    if shell == Shell::Bash && commands_dir == env.home {
        append_bashrc_source(env, &commands_file)?;
    }

    tracing::info!(
        completions = %completions_file.display(),
        commands = %commands_file.display(),
        "shell helpers installed"
    );
    Ok(InstallSummary {
        completions_file,
        commands_file,
    })
}

fn completions_dir(shell: Shell, options: &InstallOptions, env: &ShellEnv) -> InstallResult<PathBuf> {
    if let Some(path) = &options.completions_path {
        return Ok(path.clone());
    }
    if options.global {
        return match shell {
            Shell::Bash => pkg_config_dir("bash-completion", "completionsdir", "completions"),
            Shell::Fish => pkg_config_dir("fish", "completionsdir", "completions"),
        };
    }
    Ok(match shell {
        // Bash completion lookup order mirrors bash-completion's own:
        // explicit override, XDG data home, then the conventional default.
        Shell::Bash => {
            if let Some(dir) = env.var("BASH_COMPLETION_USER_DIR") {
                PathBuf::from(dir)
            } else if let Some(xdg) = env.var("XDG_DATA_HOME") {
                PathBuf::from(xdg).join("bash-completion/completions")
            } else {
                env.home.join(".local/share/bash-completion/completions")
            }
        }
        Shell::Fish => env.fish_config_dir().join("completions"),
    })
}

fn commands_dir(shell: Shell, options: &InstallOptions, env: &ShellEnv) -> InstallResult<PathBuf> {
    if let Some(path) = &options.commands_path {
        return Ok(path.clone());
    }
    if options.global {
        return match shell {
            // Bash defines no functions directory; use the standard
            // location for commands.
            Shell::Bash => Ok(PathBuf::from("/usr/local/bin")),
            Shell::Fish => pkg_config_dir("fish", "functionsdir", "functions"),
        };
    }
    Ok(match shell {
        Shell::Bash => env.home.clone(),
        Shell::Fish => env.fish_config_dir().join("functions"),
    })
}

fn pkg_config_dir(package: &str, variable: &str, what: &'static str) -> InstallResult<PathBuf> {
    let output = Command::new("pkg-config")
        .arg(format!("--variable={variable}"))
        .arg(package)
        .output()
        .map_err(|_| InstallError::PkgConfig { what })?;
    if !output.status.success() {
        return Err(InstallError::PkgConfig { what });
    }
    let dir = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    if dir.is_empty() {
        return Err(InstallError::PkgConfig { what });
    }
    Ok(PathBuf::from(dir))
}

fn write_script(path: &Path, contents: &str) -> InstallResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| InstallError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| InstallError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn append_bashrc_source(env: &ShellEnv, script: &Path) -> InstallResult<()> {
    use std::io::Write;

    let bashrc = env.home.join(".bashrc");
    let line = format!("source '{}'", script.display());

    // Idempotent: skip when .bashrc already sources the helper.
    if let Ok(existing) = std::fs::read_to_string(&bashrc) {
        if existing.contains(&line) {
            return Ok(());
        }
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&bashrc)
        .map_err(|source| InstallError::Write {
            path: bashrc.clone(),
            source,
        })?;
    writeln!(file, "\n{line}").map_err(|source| InstallError::Write {
        path: bashrc,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_shell_is_an_error() {
        assert!(matches!(
            Shell::from_name("zsh"),
            Err(InstallError::UnsupportedShell { .. })
        ));
    }

    #[test]
    fn bash_completion_dir_prefers_explicit_env() {
        let env = ShellEnv::new("/home/me")
            .with_var("BASH_COMPLETION_USER_DIR", "/custom/completions")
            .with_var("XDG_DATA_HOME", "/home/me/.local/share");
        let dir = completions_dir(Shell::Bash, &InstallOptions::default(), &env).unwrap();
        assert_eq!(dir, PathBuf::from("/custom/completions"));
    }

    #[test]
    fn bash_completion_dir_falls_back_through_xdg_to_home() {
        let env = ShellEnv::new("/home/me").with_var("XDG_DATA_HOME", "/data");
        let dir = completions_dir(Shell::Bash, &InstallOptions::default(), &env).unwrap();
        assert_eq!(dir, PathBuf::from("/data/bash-completion/completions"));

        let env = ShellEnv::new("/home/me");
        let dir = completions_dir(Shell::Bash, &InstallOptions::default(), &env).unwrap();
        assert_eq!(
            dir,
            PathBuf::from("/home/me/.local/share/bash-completion/completions")
        );
    }

    #[test]
    fn fish_dirs_live_under_the_fish_config_dir() {
        let env = ShellEnv::new("/home/me");
        let options = InstallOptions::default();
        assert_eq!(
            completions_dir(Shell::Fish, &options, &env).unwrap(),
            PathBuf::from("/home/me/.config/fish/completions")
        );
        assert_eq!(
            commands_dir(Shell::Fish, &options, &env).unwrap(),
            PathBuf::from("/home/me/.config/fish/functions")
        );
    }

    #[test]
    fn explicit_overrides_win() {
        let env = ShellEnv::new("/home/me");
        let options = InstallOptions {
            global: true,
            completions_path: Some(PathBuf::from("/opt/comp")),
            commands_path: Some(PathBuf::from("/opt/cmd")),
        };
        assert_eq!(
            completions_dir(Shell::Bash, &options, &env).unwrap(),
            PathBuf::from("/opt/comp")
        );
        assert_eq!(
            commands_dir(Shell::Fish, &options, &env).unwrap(),
            PathBuf::from("/opt/cmd")
        );
    }

    #[test]
    fn install_writes_both_files_and_wires_bashrc() {
        let home = tempfile::tempdir().unwrap();
        let env = ShellEnv::new(home.path());
        let summary = install(Shell::Bash, &InstallOptions::default(), &env).unwrap();

        assert!(summary.completions_file.exists());
        assert!(summary.commands_file.exists());
        let bashrc = std::fs::read_to_string(home.path().join(".bashrc")).unwrap();
        assert!(bashrc.contains("source '"));

        // Re-running must not duplicate the source line.
        install(Shell::Bash, &InstallOptions::default(), &env).unwrap();
        let again = std::fs::read_to_string(home.path().join(".bashrc")).unwrap();
        assert_eq!(bashrc, again);
    }
}
