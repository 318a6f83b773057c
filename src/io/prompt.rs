//! Interactive disambiguation prompt.
//!
//! The resolver only decides *when* disambiguation is needed and *what*
//! the candidate set is; presenting the choices is this collaborator's
//! job. The terminal implementation renders on stderr so the chosen path
//! on stdout stays safe to capture in `cd "$(projhop get-path ...)"`.

use crate::matching::ProjectMatch;
use console::Term;
use dialoguer::{Select, theme::ColorfulTheme};
use std::io;

/// Presents N candidates and returns the chosen one, or `None` when the
/// user cancels.
pub trait ProjectPicker {
    fn choose(&self, candidates: &[ProjectMatch], separator: &str)
    -> io::Result<Option<ProjectMatch>>;
}

/// Terminal picker backed by a select prompt on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPicker;

impl ProjectPicker for TerminalPicker {
    fn choose(
        &self,
        candidates: &[ProjectMatch],
        separator: &str,
    ) -> io::Result<Option<ProjectMatch>> {
        let labels: Vec<String> = candidates.iter().map(|m| m.qualified(separator)).collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("The input is ambiguous, please choose the project you want to go to")
            .items(&labels)
            .default(0)
            .interact_on_opt(&Term::stderr())
            .map_err(io::Error::other)?;

        Ok(selection.map(|index| candidates[index].clone()))
    }
}
