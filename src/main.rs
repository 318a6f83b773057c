//! CLI entry point for the projhop project-directory resolver.
//!
//! Provides the `get-path` and `get-list` query commands, the
//! `root add|delete|rename` registry mutations, `config` for display
//! settings, and `install` for shell helpers. Exit codes: 0 on success,
//! 1 on failure; resolved paths go to stdout, everything else to stderr.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use projhop::install::{InstallOptions, InstallSummary, Shell, ShellEnv};
use projhop::io::{ExitCode, ProjectPicker, TerminalPicker};
use projhop::{
    OsDirectoryLister, ProjectMatch, Resolution, RootRegistry, Settings, format_listing,
    list_projects, resolve,
};
use std::io::Write;
use std::path::{Path, PathBuf};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Project directory resolver
#[derive(Parser)]
#[command(
    name = "projhop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve project directories for jump-to-project shell workflows",
    long_about = "Resolve a root:project or bare project token against your configured \
                  project roots. Pair with the gp shell helper to jump between projects.",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to a custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Resolve a project token to a directory path
    #[command(name = "get-path")]
    GetPath {
        /// Search token, optionally root-qualified (e.g. "work:api")
        project: Option<String>,
    },

    /// List every project across all roots
    #[command(name = "get-list")]
    GetList {
        /// Also emit bare project names (for shell completion word lists)
        #[arg(long)]
        completions: bool,

        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage project roots
    Root {
        #[command(subcommand)]
        command: RootCommands,
    },

    /// Show or update configuration settings
    #[command(
        after_help = "Settings:\n  \
                      namespace-separator   Separator between root and project names\n  \
                      show-all-directories  Include project directories starting with '.'"
    )]
    Config {
        /// Setting to change; omit to print the active configuration
        key: Option<String>,

        /// New value for the setting
        value: Option<String>,
    },

    /// Install the gp helper and completions for your shell
    Install {
        /// Shell to install for (bash or fish)
        shell: String,

        /// Install for all users (may require elevated privileges)
        #[arg(short, long)]
        global: bool,

        /// Explicit directory for the completion script
        #[arg(long)]
        completions_path: Option<PathBuf>,

        /// Explicit directory for the gp function script
        #[arg(long)]
        functions_path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RootCommands {
    /// Add a project root
    Add {
        /// Directory whose subdirectories are projects
        path: PathBuf,

        /// Root name; defaults to the directory's basename
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a project root
    Delete {
        /// Name of the root to remove
        name: String,
    },

    /// Rename a project root
    Rename {
        /// Current root name
        current_name: String,

        /// New root name
        new_name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PROJHOP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => match Settings::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(ExitCode::Failure.into());
            }
        },
    };

    let code = match cli.command {
        Commands::GetPath { project } => {
            run_get_path(&config_path, project.as_deref().unwrap_or(""))
        }
        Commands::GetList { completions, json } => run_get_list(&config_path, completions, json),
        Commands::Root { command } => run_root(&config_path, command),
        Commands::Config { key, value } => run_config(&config_path, key.as_deref(), value.as_deref()),
        Commands::Install {
            shell,
            global,
            completions_path,
            functions_path,
        } => run_install(&shell, global, completions_path, functions_path),
    };

    std::process::exit(code.into());
}

/// Loads settings, applying (and persisting) the legacy single-root
/// migration when needed.
fn load_settings(config_path: &Path) -> Result<Settings, ExitCode> {
    let mut settings = Settings::load_from(config_path).map_err(|e| {
        eprintln!("{e}");
        ExitCode::Failure
    })?;
    if settings.migrate_legacy() {
        settings.save(config_path).map_err(|e| {
            eprintln!("{e}");
            ExitCode::Failure
        })?;
    }
    Ok(settings)
}

fn require_roots(registry: &RootRegistry) -> Result<(), ExitCode> {
    if registry.is_empty() {
        eprintln!("Please set up a project root using:\n");
        eprintln!("\tprojhop root add /path/to/projects");
        return Err(ExitCode::Failure);
    }
    Ok(())
}

fn run_get_path(config_path: &Path, token: &str) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(settings) => settings,
        Err(code) => return code,
    };
    let registry = settings.registry();
    if let Err(code) = require_roots(&registry) {
        return code;
    }

    let outcome = match resolve(&OsDirectoryLister, &registry, token) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::Failure;
        }
    };

    match outcome {
        Resolution::Resolved(m) => emit_path(&m),
        Resolution::NotFound => {
            eprintln!("Could not find a match for the project name '{token}'.");
            ExitCode::Failure
        }
        Resolution::Ambiguous(candidates) => {
            match TerminalPicker.choose(&candidates, &registry.separator) {
                Ok(Some(chosen)) => emit_path(&chosen),
                // Cancellation is a user-initiated abort: no output, no
                // config writes, non-zero exit.
                Ok(None) => ExitCode::Failure,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::Failure
                }
            }
        }
    }
}

/// Writes the resolved path to stdout without a trailing newline, so
/// `cd "$(projhop get-path ...)"` sees exactly the path. Flushed
/// explicitly: the process exits without dropping stdout.
fn emit_path(chosen: &ProjectMatch) -> ExitCode {
    let mut stdout = std::io::stdout();
    if write!(stdout, "{}", chosen.path.display())
        .and_then(|()| stdout.flush())
        .is_err()
    {
        return ExitCode::Failure;
    }
    ExitCode::Success
}

fn run_get_list(config_path: &Path, completions: bool, json: bool) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(settings) => settings,
        Err(code) => return code,
    };
    let registry = settings.registry();
    if let Err(code) = require_roots(&registry) {
        return code;
    }

    let projects = match list_projects(&OsDirectoryLister, &registry) {
        Ok(projects) => projects,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::Failure;
        }
    };

    if json {
        match serde_json::to_string_pretty(&projects) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::Failure;
            }
        }
        return ExitCode::Success;
    }

    for line in format_listing(&projects, &registry.separator, completions) {
        println!("{line}");
    }
    ExitCode::Success
}

fn run_root(config_path: &Path, command: RootCommands) -> ExitCode {
    let mut settings = match load_settings(config_path) {
        Ok(settings) => settings,
        Err(code) => return code,
    };
    let mut registry = settings.registry();

    let outcome = match command {
        RootCommands::Add { path, name } => {
            let normalized = projhop::normalize_root_path(&path);
            let name = match name.or_else(|| {
                normalized
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            }) {
                Some(name) => name,
                None => {
                    eprintln!(
                        "Could not derive a root name from '{}'; pass one with --name.",
                        path.display()
                    );
                    return ExitCode::Failure;
                }
            };
            registry
                .add(&name, &path)
                .map(|root| format!("Added project root '{}' at '{}'.", root.name, root.path.display()))
        }
        RootCommands::Delete { name } => registry
            .delete(&name)
            .map(|root| format!("Deleted project root '{}'.", root.name)),
        RootCommands::Rename {
            current_name,
            new_name,
        } => registry
            .rename(&current_name, &new_name)
            .map(|()| format!("Renamed project root '{current_name}' to '{new_name}'.")),
    };

    match outcome {
        Ok(message) => {
            settings.roots = registry.into_roots();
            if let Err(e) = settings.save(config_path) {
                eprintln!("{e}");
                return ExitCode::Failure;
            }
            println!("{message}");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::Failure
        }
    }
}

fn run_config(config_path: &Path, key: Option<&str>, value: Option<&str>) -> ExitCode {
    let mut settings = match load_settings(config_path) {
        Ok(settings) => settings,
        Err(code) => return code,
    };

    let (key, value) = match (key, value) {
        (Some(key), Some(value)) => (key, value),
        (None, _) => {
            // No arguments: show the active configuration.
            match toml::to_string_pretty(&settings) {
                Ok(out) => {
                    println!("Current configuration:");
                    println!("{}", "=".repeat(40));
                    print!("{out}");
                    return ExitCode::Success;
                }
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::Failure;
                }
            }
        }
        (Some(_), None) => {
            eprintln!("config needs both a key and a value (or neither).");
            return ExitCode::Failure;
        }
    };

    match settings.apply_setting(key, value) {
        Ok(stored) => {
            if let Err(e) = settings.save(config_path) {
                eprintln!("{e}");
                return ExitCode::Failure;
            }
            println!("Set the setting '{key}' to '{stored}'.");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::Failure
        }
    }
}

fn run_install(
    shell: &str,
    global: bool,
    completions_path: Option<PathBuf>,
    functions_path: Option<PathBuf>,
) -> ExitCode {
    let shell = match Shell::from_name(shell) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::Failure;
        }
    };
    let env = match ShellEnv::from_os() {
        Ok(env) => env,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::Failure;
        }
    };
    let options = InstallOptions {
        global,
        completions_path,
        commands_path: functions_path,
    };

    match projhop::install::install(shell, &options, &env) {
        Ok(InstallSummary {
            completions_file,
            commands_file,
        }) => {
            println!("Successfully installed shell helpers:");
            println!("  completions: {}", completions_file.display());
            println!("  command:     {}", commands_file.display());
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::Failure
        }
    }
}
